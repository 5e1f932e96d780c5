//! Tracing hook for engine execution.
//!
//! The tracer is a zero-cost abstraction: `NoopTracer`'s methods are
//! `#[inline(always)]` empty functions, so traced and untraced lexing compile
//! to the same code. Implementations receive raw data (state names, offsets)
//! and do their own formatting.
//!
//! Structural changes performed through custom rule callbacks are not traced;
//! the hook covers the engine loop itself.

use std::io::{self, Write};

/// Observer for engine steps.
pub trait Tracer {
    /// Called at the start of each step with the top-of-stack state.
    fn step(&mut self, state: &str, depth: usize, pos: usize);

    /// Called when a rule's pattern matches at the cursor.
    fn rule_matched(&mut self, pattern: &str, pos: usize, len: usize);

    /// Called when a built-in action pushes a state.
    fn stack_pushed(&mut self, state: &str);

    /// Called when a built-in action pops; `depth` is the new stack depth.
    fn stack_popped(&mut self, depth: usize);

    /// Called when no rule matched and one character is consumed as `Error`.
    fn error_char(&mut self, pos: usize);

    /// Called when the zero-width match guard trips.
    fn null_overflow(&mut self, pos: usize);
}

impl<T: Tracer + ?Sized> Tracer for &mut T {
    fn step(&mut self, state: &str, depth: usize, pos: usize) {
        (**self).step(state, depth, pos);
    }

    fn rule_matched(&mut self, pattern: &str, pos: usize, len: usize) {
        (**self).rule_matched(pattern, pos, len);
    }

    fn stack_pushed(&mut self, state: &str) {
        (**self).stack_pushed(state);
    }

    fn stack_popped(&mut self, depth: usize) {
        (**self).stack_popped(depth);
    }

    fn error_char(&mut self, pos: usize) {
        (**self).error_char(pos);
    }

    fn null_overflow(&mut self, pos: usize) {
        (**self).null_overflow(pos);
    }
}

/// No-op tracer that gets optimized away completely.
pub struct NoopTracer;

impl Tracer for NoopTracer {
    #[inline(always)]
    fn step(&mut self, _state: &str, _depth: usize, _pos: usize) {}

    #[inline(always)]
    fn rule_matched(&mut self, _pattern: &str, _pos: usize, _len: usize) {}

    #[inline(always)]
    fn stack_pushed(&mut self, _state: &str) {}

    #[inline(always)]
    fn stack_popped(&mut self, _depth: usize) {}

    #[inline(always)]
    fn error_char(&mut self, _pos: usize) {}

    #[inline(always)]
    fn null_overflow(&mut self, _pos: usize) {}
}

/// Tracer that writes one structured line per event.
pub struct PrintTracer<W: Write> {
    out: W,
}

impl PrintTracer<io::Stderr> {
    pub fn stderr() -> Self {
        Self { out: io::stderr() }
    }
}

impl<W: Write> PrintTracer<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }
}

impl<W: Write> Tracer for PrintTracer<W> {
    fn step(&mut self, state: &str, depth: usize, pos: usize) {
        let _ = writeln!(self.out, "step  {state} depth={depth} pos={pos}");
    }

    fn rule_matched(&mut self, pattern: &str, pos: usize, len: usize) {
        let _ = writeln!(self.out, "match {pattern:?} pos={pos} len={len}");
    }

    fn stack_pushed(&mut self, state: &str) {
        let _ = writeln!(self.out, "push  {state}");
    }

    fn stack_popped(&mut self, depth: usize) {
        let _ = writeln!(self.out, "pop   depth={depth}");
    }

    fn error_char(&mut self, pos: usize) {
        let _ = writeln!(self.out, "error pos={pos}");
    }

    fn null_overflow(&mut self, pos: usize) {
        let _ = writeln!(self.out, "stall pos={pos}");
    }
}
