//! Stack growth for deeply recursive front-end code.
//!
//! The Kiwi parser descends once per nesting level of an expression or
//! block, and the value model recurses through nested lists and
//! hashmaps when comparing, hashing or serializing. Both wrap their
//! recursive entry points in [`ensure_sufficient_stack`] so a script with
//! thousands of nested brackets grows the stack instead of aborting.
//!
//! On wasm32 the guard is a plain call.

/// Grow when less than this much stack is left (128KB).
const RED_ZONE: usize = 128 * 1024;

/// Size of each freshly allocated stack segment (2MB).
const STACK_SEGMENT: usize = 2 * 1024 * 1024;

/// Run `f`, first switching to a new stack segment if the current one
/// is nearly exhausted.
///
/// ```text
/// fn parse_expression(&mut self) -> PResult<Node> {
///     ensure_sufficient_stack(|| self.parse_ternary())
/// }
/// ```
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, STACK_SEGMENT, f)
}

/// wasm32 manages its own stack.
#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}
