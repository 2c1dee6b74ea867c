//! Name mangling.
//!
//! Every scoped binding (`var` entries, parameters, loop iterators,
//! `case ... as` aliases, `catch` bindings) gets a fresh name of the form
//! `_<n>$_<name>`. `$` never appears in a lexed identifier, so a mangled
//! name cannot collide with one the user wrote. Lookups walk the frames
//! innermost first; the mangled name is written into the AST in place
//! of the original.

use rustc_hash::FxHashMap;

type Frame = FxHashMap<String, String>;

#[derive(Clone, Debug)]
pub(crate) struct Scopes {
    /// Never empty: the first frame is the top level.
    frames: Vec<Frame>,
    counter: u64,
}

impl Default for Scopes {
    fn default() -> Self {
        Scopes {
            frames: vec![Frame::default()],
            counter: 0,
        }
    }
}

impl Scopes {
    /// Enter a function or lambda body.
    pub(crate) fn push(&mut self) {
        self.frames.push(Frame::default());
    }

    /// Leave a function or lambda body, dropping all of its bindings.
    pub(crate) fn pop(&mut self) {
        if self.frames.len() > 1 {
            self.frames.pop();
        }
    }

    /// Bind `name` in the innermost frame and return its mangled form.
    /// `None` when the frame already binds it.
    pub(crate) fn declare(&mut self, name: &str) -> Option<String> {
        let counter = self.counter + 1;
        let frame = self.frames.last_mut()?;
        if frame.contains_key(name) {
            return None;
        }
        self.counter = counter;
        let mangled = format!("_{counter}$_{name}");
        frame.insert(name.to_string(), mangled.clone());
        Some(mangled)
    }

    /// Unbind `name` from the innermost frame.
    pub(crate) fn forget(&mut self, name: &str) {
        if let Some(frame) = self.frames.last_mut() {
            frame.remove(name);
        }
    }

    /// Mangled form of `name` from the innermost frame that binds it.
    pub(crate) fn resolve(&self, name: &str) -> Option<&str> {
        self.frames
            .iter()
            .rev()
            .find_map(|frame| frame.get(name))
            .map(String::as_str)
    }

    /// `name` as it should appear in the AST.
    pub(crate) fn lookup(&self, name: &str) -> String {
        self.resolve(name).unwrap_or(name).to_string()
    }

    pub(crate) fn depth(&self) -> usize {
        self.frames.len()
    }

    /// Put the frames back as they were at `saved`. The counter keeps
    /// counting, so names minted after the save are never reissued.
    pub(crate) fn restore(&mut self, saved: Scopes) {
        self.frames = saved.frames;
    }
}
