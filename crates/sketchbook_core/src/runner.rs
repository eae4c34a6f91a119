//! Sketch registry with an active-sketch stack
//!
//! The SketchRunner provides a centralized way to manage the portfolio:
//! - Register sketches by name
//! - Maintain a stack of active sketches (top = current)
//! - Forward updates and input to the active sketch only
//!
//! # Example
//! ```ignore
//! let mut runner = SketchRunner::new();
//! runner.register(Box::new(BouncingBall::new(config)));
//!
//! runner.push_sketch("bouncing-ball")?;
//!
//! // Frame loop
//! runner.update(dt);
//! ```

use std::collections::HashMap;

use crate::{CoreError, InputEvent, Sketch, SketchStatus};

/// Manages the registered sketches and which one is active
///
/// Only the sketch on top of the stack receives updates and input. Pushing
/// another sketch on top pauses the one below without losing its state,
/// which is how the originals layered menus over running games.
pub struct SketchRunner {
    /// All registered sketches, keyed by their reported name
    sketches: HashMap<String, Box<dyn Sketch>>,
    /// Stack of active sketch names (top = current)
    active_stack: Vec<String>,
}

impl Default for SketchRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl SketchRunner {
    /// Create a new empty runner
    pub fn new() -> Self {
        Self {
            sketches: HashMap::new(),
            active_stack: Vec::new(),
        }
    }

    // --- Registry ---

    /// Register a sketch under its own name
    ///
    /// Re-registering a name replaces the previous sketch.
    pub fn register(&mut self, sketch: Box<dyn Sketch>) {
        let name = sketch.name().to_string();
        if self.sketches.insert(name.clone(), sketch).is_some() {
            log::warn!("replacing already-registered sketch '{}'", name);
        }
    }

    /// Remove a sketch from the registry and return it
    ///
    /// The name is also dropped from the active stack.
    pub fn remove(&mut self, name: &str) -> Option<Box<dyn Sketch>> {
        self.active_stack.retain(|active| active != name);
        self.sketches.remove(name)
    }

    /// Names of all registered sketches, sorted
    pub fn registered_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.sketches.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Look up a registered sketch by name
    pub fn get(&self, name: &str) -> Option<&dyn Sketch> {
        self.sketches.get(name).map(Box::as_ref)
    }

    /// Look up a registered sketch mutably by name
    pub fn get_mut(&mut self, name: &str) -> Option<&mut Box<dyn Sketch>> {
        self.sketches.get_mut(name)
    }

    // --- Active stack ---

    /// Push a sketch onto the stack, making it the active sketch
    pub fn push_sketch(&mut self, name: &str) -> Result<(), CoreError> {
        if !self.sketches.contains_key(name) {
            return Err(CoreError::NotRegistered(name.to_string()));
        }
        log::info!("activating sketch '{}'", name);
        self.active_stack.push(name.to_string());
        Ok(())
    }

    /// Pop the top sketch from the stack
    ///
    /// Returns the name of the popped sketch, or None if the stack is empty.
    /// The sketch itself stays registered with its state intact.
    pub fn pop_sketch(&mut self) -> Option<String> {
        self.active_stack.pop()
    }

    /// Replace the top of the stack with a different sketch
    ///
    /// If the stack is empty this is equivalent to `push_sketch`.
    pub fn switch_to(&mut self, name: &str) -> Result<(), CoreError> {
        if !self.sketches.contains_key(name) {
            return Err(CoreError::NotRegistered(name.to_string()));
        }
        self.active_stack.pop();
        self.active_stack.push(name.to_string());
        Ok(())
    }

    /// Name of the currently active sketch
    pub fn active_name(&self) -> Option<&str> {
        self.active_stack.last().map(String::as_str)
    }

    /// Reference to the currently active sketch
    pub fn active_sketch(&self) -> Option<&dyn Sketch> {
        self.active_name()
            .and_then(|name| self.sketches.get(name))
            .map(Box::as_ref)
    }

    /// Mutable reference to the currently active sketch
    pub fn active_sketch_mut(&mut self) -> Option<&mut Box<dyn Sketch>> {
        if let Some(name) = self.active_stack.last().cloned() {
            self.sketches.get_mut(&name)
        } else {
            None
        }
    }

    /// Number of sketches on the stack
    pub fn stack_depth(&self) -> usize {
        self.active_stack.len()
    }

    /// Check whether a sketch is anywhere on the stack
    pub fn is_active(&self, name: &str) -> bool {
        self.active_stack.iter().any(|active| active == name)
    }

    // --- Frame loop ---

    /// Advance the active sketch by `dt` seconds
    ///
    /// Returns the active sketch's status after the update; an empty stack
    /// reports `Finished`.
    pub fn update(&mut self, dt: f32) -> SketchStatus {
        match self.active_sketch_mut() {
            Some(sketch) => {
                sketch.update(dt);
                sketch.status()
            }
            None => SketchStatus::Finished,
        }
    }

    /// Forward an input event to the active sketch
    pub fn dispatch_input(&mut self, event: &InputEvent) {
        if let Some(sketch) = self.active_sketch_mut() {
            sketch.handle_input(event);
        }
    }
}
