//! Recursive descent compiler from pattern source to a node [`Graph`].
//!
//! The source is read one byte at a time. Every operand parsed at one level
//! is kept on a stack; postfix and infix operators pop their left operand
//! from it, and once the level ends the stack is folded left to right into
//! a single sequence.

use crate::escape::unescape;

use super::char_class::class_members;
use super::ensure_sufficient_stack;
use super::graph::{Graph, NodeId};
use super::state::State;

/// Errors that can occur while compiling a pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatternError {
    UnrecognizedByte(u8),
    MissingPreOperand(u8),
    MissingPostOperand(u8),
    UnterminatedGroup,
    UnmatchedGroupClose,
    UnmatchedRangeClose,
    UnterminatedRange,
    ExpectedRangeDash(u8),
    ExpectedRangeClose(u8),
    EmptyRange { lo: u8, hi: u8 },
    UnterminatedLiteral(u8),
}

impl std::fmt::Display for PatternError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnrecognizedByte(b) => write!(
                f,
                "'{}': unrecognized byte in pattern, none of [_aonQq!/[^'`{{}}|?*+~]",
                b.escape_ascii()
            ),
            Self::MissingPreOperand(op) => {
                write!(f, "Missing pre-operand for <{}>", char::from(*op))
            }
            Self::MissingPostOperand(op) => {
                write!(f, "Missing post-operand for <{}>", char::from(*op))
            }
            Self::UnterminatedGroup => write!(f, "Unmatched group brace, missing <}}>"),
            Self::UnmatchedGroupClose => write!(f, "Unmatched group brace, missing <{{>"),
            Self::UnmatchedRangeClose => write!(f, "Unmatched range bracket, missing <[>"),
            Self::UnterminatedRange => write!(f, "Unexpected end of pattern inside range"),
            Self::ExpectedRangeDash(b) => write!(
                f,
                "Expected <-> between range bounds, found '{}'",
                b.escape_ascii()
            ),
            Self::ExpectedRangeClose(b) => write!(
                f,
                "Expected <]> at the end of the range, found '{}'",
                b.escape_ascii()
            ),
            Self::EmptyRange { lo, hi } => write!(
                f,
                "Range [{}-{}] is empty and can never match",
                lo.escape_ascii(),
                hi.escape_ascii()
            ),
            Self::UnterminatedLiteral(quote) => {
                write!(f, "Unclosed literal, missing <{}>", char::from(*quote))
            }
        }
    }
}

impl std::error::Error for PatternError {}

/// Compile pattern source into a graph.
///
/// An empty pattern (or one made only of blanks and empty groups) compiles
/// to a single epsilon node that matches zero bytes.
pub fn compile(source: &[u8]) -> Result<Graph, PatternError> {
    let mut compiler = Compiler {
        source,
        pos: 0,
        depth: 0,
        graph: Graph::new(),
    };
    let head = match compiler.sequence()? {
        Some(head) => head,
        None => compiler.graph.add(State::Epsilon),
    };
    compiler.graph.set_head(head);
    Ok(compiler.graph)
}

struct Compiler<'a> {
    source: &'a [u8],
    pos: usize,
    /// Number of enclosing `{` groups.
    depth: usize,
    graph: Graph,
}

impl Compiler<'_> {
    fn peek(&self) -> Option<u8> {
        self.source.get(self.pos).copied()
    }

    fn next_byte(&mut self) -> Option<u8> {
        let byte = self.peek()?;
        self.pos += 1;
        Some(byte)
    }

    fn skip_blanks(&mut self) {
        while matches!(
            self.peek(),
            Some(b' ' | b'\t' | b'\n' | b'\r' | 0x0b | 0x0c)
        ) {
            self.pos += 1;
        }
    }

    /// End of the current level: end of input, or the `}` closing a group.
    fn at_boundary(&self) -> bool {
        match self.peek() {
            None => true,
            Some(b'}') => self.depth > 0,
            Some(_) => false,
        }
    }

    /// Parse units until the level ends and sequence them.
    fn sequence(&mut self) -> Result<Option<NodeId>, PatternError> {
        let mut stack = Vec::new();
        while !self.at_boundary() {
            if let Some(unit) = self.unit(&mut stack)? {
                stack.push(unit);
            }
        }

        let mut units = stack.into_iter();
        let Some(head) = units.next() else {
            return Ok(None);
        };
        for seq in units {
            self.graph.merge(head, seq);
        }
        Ok(Some(head))
    }

    /// Parse the next unit. `Ok(None)` means nothing was produced: the level
    /// ended, or the unit was an empty group.
    fn unit(&mut self, stack: &mut Vec<NodeId>) -> Result<Option<NodeId>, PatternError> {
        ensure_sufficient_stack(|| self.parse_unit(stack))
    }

    fn parse_unit(&mut self, stack: &mut Vec<NodeId>) -> Result<Option<NodeId>, PatternError> {
        self.skip_blanks();
        if self.at_boundary() {
            return Ok(None);
        }
        let Some(byte) = self.next_byte() else {
            return Ok(None);
        };

        let node = match byte {
            b'!' => {
                let inner = self.post_operand(b'!', stack)?;
                self.graph.add(State::Negate(inner))
            }
            b'/' => {
                let inner = self.post_operand(b'/', stack)?;
                self.graph.add(State::Lookahead(inner))
            }
            b'[' => self.range()?,
            b'^' => self.graph.add(State::Wildcard),
            b'\'' => {
                let text = self.literal(b'\'')?;
                self.graph.add(State::Literal(text))
            }
            b'`' => {
                let text = unescape(&self.literal(b'`')?);
                self.graph.add(State::Literal(text))
            }
            b'{' => return self.group(),
            b'|' => self.alternation(stack)?,
            b'?' => self.optional(stack)?,
            b'*' => self.star(stack)?,
            b'+' => self.plus(stack)?,
            b'~' => self.scan(stack)?,
            b'}' => return Err(PatternError::UnmatchedGroupClose),
            b']' => return Err(PatternError::UnmatchedRangeClose),
            _ => match class_members(byte) {
                Some(members) => self.graph.add(State::Set(members)),
                None => return Err(PatternError::UnrecognizedByte(byte)),
            },
        };
        Ok(Some(node))
    }

    fn pre_operand(op: u8, stack: &mut Vec<NodeId>) -> Result<NodeId, PatternError> {
        stack.pop().ok_or(PatternError::MissingPreOperand(op))
    }

    fn post_operand(&mut self, op: u8, stack: &mut Vec<NodeId>) -> Result<NodeId, PatternError> {
        self.unit(stack)?.ok_or(PatternError::MissingPostOperand(op))
    }

    /// `[lo-hi]`, the opening bracket already consumed.
    fn range(&mut self) -> Result<NodeId, PatternError> {
        let lo = self.next_byte().ok_or(PatternError::UnterminatedRange)?;
        match self.next_byte() {
            Some(b'-') => {}
            Some(other) => return Err(PatternError::ExpectedRangeDash(other)),
            None => return Err(PatternError::UnterminatedRange),
        }
        let hi = self.next_byte().ok_or(PatternError::UnterminatedRange)?;
        match self.next_byte() {
            Some(b']') => {}
            Some(other) => return Err(PatternError::ExpectedRangeClose(other)),
            None => return Err(PatternError::UnterminatedRange),
        }
        if lo > hi {
            return Err(PatternError::EmptyRange { lo, hi });
        }
        Ok(self.graph.add(State::Range(lo, hi)))
    }

    /// Raw bytes up to the closing `quote`, the opening one already consumed.
    fn literal(&mut self, quote: u8) -> Result<Vec<u8>, PatternError> {
        let start = self.pos;
        loop {
            match self.next_byte() {
                Some(byte) if byte == quote => {
                    return Ok(self.source[start..self.pos - 1].to_vec());
                }
                Some(_) => {}
                None => return Err(PatternError::UnterminatedLiteral(quote)),
            }
        }
    }

    /// `{...}`: an independent sub-pattern with its own operand stack.
    fn group(&mut self) -> Result<Option<NodeId>, PatternError> {
        self.depth += 1;
        let inner = self.sequence()?;
        if self.next_byte() != Some(b'}') {
            return Err(PatternError::UnterminatedGroup);
        }
        self.depth -= 1;
        Ok(inner)
    }

    /// `pre | post`: ordered choice, `pre` tried first.
    fn alternation(&mut self, stack: &mut Vec<NodeId>) -> Result<NodeId, PatternError> {
        let pre = Self::pre_operand(b'|', stack)?;
        let post = self.post_operand(b'|', stack)?;

        let choice = self.graph.add(State::Epsilon);
        self.graph.push(choice, pre);
        self.graph.push(choice, post);
        Ok(choice)
    }

    /// `pre ?`: try `pre`, else skip it.
    fn optional(&mut self, stack: &mut Vec<NodeId>) -> Result<NodeId, PatternError> {
        let pre = Self::pre_operand(b'?', stack)?;

        let choice = self.graph.add(State::Epsilon);
        self.graph.push(choice, pre);
        let skip = self.graph.add(State::Epsilon);
        self.graph.push(choice, skip);
        Ok(choice)
    }

    /// `pre *`: loop through `pre` as often as possible, exit through an
    /// epsilon alternative.
    fn star(&mut self, stack: &mut Vec<NodeId>) -> Result<NodeId, PatternError> {
        let pre = Self::pre_operand(b'*', stack)?;

        let entry = self.graph.add(State::Epsilon);
        self.graph.merge(entry, pre);
        self.graph.concat(entry, entry);
        let exit = self.graph.add(State::Epsilon);
        self.graph.push(entry, exit);
        Ok(entry)
    }

    /// `pre +`: every tail of `pre` loops back to its head.
    fn plus(&mut self, stack: &mut Vec<NodeId>) -> Result<NodeId, PatternError> {
        let pre = Self::pre_operand(b'+', stack)?;
        self.graph.concat(pre, pre);
        Ok(pre)
    }

    /// `pre ~ post`: skip over `pre` until `post` matches, trying `post` first
    /// at every step.
    fn scan(&mut self, stack: &mut Vec<NodeId>) -> Result<NodeId, PatternError> {
        let pre = Self::pre_operand(b'~', stack)?;
        let post = self.post_operand(b'~', stack)?;

        let decision = self.graph.add(State::Epsilon);
        self.graph.push(decision, post);
        self.graph.push(decision, pre);
        self.graph.concat(pre, decision);
        // Tails of `pre` must go back through the decision, never stop.
        let fail = self.graph.add(State::Fail);
        self.graph.merge(pre, fail);
        Ok(decision)
    }
}
