//! Parsing several streams into one program.
//!
//! A stream that uses `Pkg::thing` before any stream has defined `Pkg`
//! is parked at the start of that statement. As soon as a statement
//! defining `Pkg` completes, the streams waiting on it run (in the order
//! they were parked) before the defining stream continues. Whatever is
//! still parked when every stream has run is finished without package
//! resolution.

use std::collections::VecDeque;

use kiwi_diagnostic::KiwiResult;
use kiwi_ir::{Node, NodeKind, Token, TokenSpan, TokenStream};
use tracing::{debug, warn};

use crate::{ParseFailure, ParseOutput, Parser};

/// How one run of a stream ended.
enum Run {
    Finished,
    /// An error was reported and the rest of the stream abandoned.
    Failed,
    /// Stalled on the named package; positioned at the stalled statement.
    Parked(String, TokenStream),
    /// The last statement defined packages that `resumed` were waiting
    /// for. `current` continues after them.
    Unblocked {
        current: TokenStream,
        resumed: Vec<TokenStream>,
    },
}

/// Streams parked on a package, in the order they were parked.
type Waiting = Vec<(String, TokenStream)>;

impl Parser<'_> {
    /// Parse `streams` into a single program.
    ///
    /// Returns `Err` only in rethrow mode.
    pub fn parse_collection(&mut self, streams: Vec<TokenStream>) -> KiwiResult<ParseOutput> {
        let token = streams
            .first()
            .map_or_else(|| Token::eof(TokenSpan::default()), |s| s.current().clone());
        let mut statements = Vec::new();
        let mut waiting = Waiting::new();

        let mut had_error = self.drive(streams.into(), &mut statements, &mut waiting)?;

        if !waiting.is_empty() {
            let packages: Vec<&str> = waiting.iter().map(|(name, _)| name.as_str()).collect();
            warn!(?packages, "packages never defined; parsing their users without resolution");
            let leftovers: VecDeque<TokenStream> = waiting.drain(..).map(|(_, s)| s).collect();
            let resolve = self.options.resolve_packages;
            self.options.resolve_packages = false;
            let result = self.drive(leftovers, &mut statements, &mut waiting);
            self.options.resolve_packages = resolve;
            had_error |= result?;
        }

        let program = Node::new(
            token,
            NodeKind::Program {
                statements,
                is_entry_point: self.options.entry_point,
            },
        );
        Ok(ParseOutput { program, had_error })
    }

    /// Run streams until none is runnable. True when any stream failed.
    fn drive(
        &mut self,
        mut pending: VecDeque<TokenStream>,
        statements: &mut Vec<Node>,
        waiting: &mut Waiting,
    ) -> KiwiResult<bool> {
        let mut had_error = false;
        // Interrupted streams, resumed last-in first-out.
        let mut suspended: Vec<TokenStream> = Vec::new();

        while let Some(stream) = suspended.pop().or_else(|| pending.pop_front()) {
            match self.run_stream(stream, statements, waiting)? {
                Run::Finished => {}
                Run::Failed => had_error = true,
                Run::Parked(package, stream) => {
                    debug!(package = %package, "stream parked");
                    waiting.push((package, stream));
                }
                Run::Unblocked { current, resumed } => {
                    suspended.push(current);
                    suspended.extend(resumed.into_iter().rev());
                }
            }
        }
        Ok(had_error)
    }

    fn run_stream(
        &mut self,
        stream: TokenStream,
        statements: &mut Vec<Node>,
        waiting: &mut Waiting,
    ) -> KiwiResult<Run> {
        self.stream = stream;
        self.defined_packages.clear();
        while !self.stream.is_at_end() {
            let checkpoint = self.checkpoint();
            match self.parse_statement() {
                Ok(node) => {
                    statements.push(node);
                    let resumed = self.take_unblocked(waiting);
                    if !resumed.is_empty() {
                        let current = self.take_stream();
                        return Ok(Run::Unblocked { current, resumed });
                    }
                }
                Err(ParseFailure::Requires(package)) => {
                    self.restore(checkpoint);
                    return Ok(Run::Parked(package, self.take_stream()));
                }
                Err(ParseFailure::Error(error)) => {
                    self.restore(checkpoint);
                    if self.options.rethrow {
                        return Err(error);
                    }
                    self.sink.report(&error);
                    return Ok(Run::Failed);
                }
            }
        }
        Ok(Run::Finished)
    }

    /// Remove and return the streams waiting on packages defined by the
    /// last statement.
    fn take_unblocked(&mut self, waiting: &mut Waiting) -> Vec<TokenStream> {
        let defined = std::mem::take(&mut self.defined_packages);
        if defined.is_empty() {
            return Vec::new();
        }
        let mut resumed = Vec::new();
        let mut index = 0;
        while index < waiting.len() {
            if defined.contains(&waiting[index].0) {
                let (package, stream) = waiting.remove(index);
                debug!(package = %package, "stream resumed");
                resumed.push(stream);
            } else {
                index += 1;
            }
        }
        resumed
    }

    fn take_stream(&mut self) -> TokenStream {
        std::mem::replace(&mut self.stream, TokenStream::new(Vec::new()))
    }
}
