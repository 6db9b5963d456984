//! Recursive-descent parser for Laye (spec §4.4).
//!
//! Produces a lossless concrete syntax tree: every non-trivia token in the
//! module ends up referenced by some node, either as a recognized slot or
//! wrapped inside an error node. Grounded in the donor's
//! `src/syntax/parser/statement.rs` for the cursor/expect/recovery shape of a
//! hand-written recursive-descent parser, generalized from Flux's statement
//! grammar down to the one declaration family this implementation covers:
//! `import`.

mod classify;
mod import;

use crate::diagnostics::{Diagnostic, Engine, SourceLookup};
use crate::lexer::{Token, TokenKind};
use crate::module::{Module, NodeId, ParseParts, SyntaxNode, TokenId};

pub use classify::{
    is_decl_end, is_decl_start, is_expr_end, is_expr_start, is_stmt_delimiter, is_stmt_end, is_stmt_start,
};

/// Parses every declaration in `module`, recording results directly into its
/// node pool and top-level list.
pub fn parse_module<'arena>(module: &mut Module<'arena>, engine: &Engine, lookup: &dyn SourceLookup) {
    let span = tracing::trace_span!("parse", file_id = module.file_id());
    let _enter = span.enter();

    let parts = module.parts_for_parse();
    let mut parser = Parser {
        parts,
        engine,
        lookup,
        pos: 0,
    };
    parser.parse_top_level();

    tracing::trace!(node_count = parser.parts.nodes.len(), "parsed module");
}

pub(crate) struct Parser<'m, 'arena> {
    parts: ParseParts<'m, 'arena>,
    engine: &'m Engine,
    lookup: &'m dyn SourceLookup,
    pos: usize,
}

impl<'m, 'arena> Parser<'m, 'arena> {
    fn parse_top_level(&mut self) {
        loop {
            if self.current_kind() == TokenKind::Eof {
                break;
            }
            let node = if self.current_kind() == TokenKind::Import {
                self.parse_import()
            } else {
                self.parse_unimplemented_decl()
            };
            self.parts.push_top_level(node);
        }
    }

    /// Any top-level construct other than `import`: reports once and skips
    /// to the next declaration boundary, preserving every token it passes
    /// over in the emitted node.
    fn parse_unimplemented_decl(&mut self) -> NodeId {
        self.error_here("this declaration is not yet implemented");
        let mut consumed_tokens = Vec::new();
        loop {
            let kind = self.current_kind();
            if kind == TokenKind::Eof {
                break;
            }
            consumed_tokens.push(self.advance());
            if classify::is_decl_start(self.current_kind()) {
                break;
            }
            if kind == TokenKind::SemiColon {
                break;
            }
        }
        self.push_node(SyntaxNode::DeclNotYetImplemented { consumed_tokens })
    }

    // ---- cursor ---------------------------------------------------------

    fn token_at(&self, index: usize) -> &Token {
        self.parts
            .tokens
            .get(index)
            .unwrap_or_else(|| self.parts.tokens.last().expect("token vector always ends in Eof"))
    }

    fn current(&self) -> &Token {
        self.token_at(self.pos)
    }

    fn current_kind(&self) -> TokenKind {
        self.current().kind
    }

    fn peek_kind(&self, ahead: usize) -> TokenKind {
        self.token_at(self.pos + ahead).kind
    }

    fn current_text_is(&self, text: &str) -> bool {
        self.token_text_is(self.pos, text)
    }

    fn peek_text_is(&self, ahead: usize, text: &str) -> bool {
        self.token_text_is(self.pos + ahead, text)
    }

    fn token_text_is(&self, index: usize, text: &str) -> bool {
        self.token_at(index)
            .text
            .map(|sym| self.parts.interner.resolve(sym) == text)
            .unwrap_or(false)
    }

    /// Advances past the current token (never past `Eof`) and returns its
    /// id.
    fn advance(&mut self) -> TokenId {
        let id = TokenId(self.pos as u32);
        if self.current_kind() != TokenKind::Eof {
            self.pos += 1;
        }
        id
    }

    /// Consumes the current token if it matches `kind`; otherwise reports an
    /// error and returns the module's invalid-token sentinel without
    /// advancing (spec §4.4 "Failure policy").
    fn expect(&mut self, kind: TokenKind) -> TokenId {
        if self.current_kind() == kind {
            return self.advance();
        }
        self.error_here(&format!("expected {kind:?}, found {:?}", self.current_kind()));
        self.sentinel()
    }

    /// Rewrites the current token's contextual role in place (spec §4.4
    /// "Contextual keywords"): `as`/`from` lex as plain identifiers and only
    /// become `As`/`From` when the grammar position expects them. Since
    /// tokens are immutable once lexed, "rewriting" here means recording the
    /// position as consumed under the expected kind; the original lexed
    /// `Identifier` token is still what lives in the token vector, which is
    /// what the tree printer and downstream consumers read — they recover
    /// the contextual role from the node shape, not from `Token::kind`.
    fn rewrite_contextual_keyword(&mut self, _expected: TokenKind) -> TokenId {
        self.advance()
    }

    fn sentinel(&self) -> TokenId {
        self.parts.invalid_token_id
    }

    fn at_decl_or_stmt_boundary(&self) -> bool {
        let kind = self.current_kind();
        classify::is_decl_start(kind) || classify::is_decl_end(kind) || kind == TokenKind::Eof
    }

    fn error_here(&self, message: &str) {
        let loc = self.current().location;
        self.engine.report(&Diagnostic::error(loc, message.to_string()), self.lookup);
    }

    fn push_node(&mut self, node: SyntaxNode) -> NodeId {
        self.parts.push_node(node)
    }
}
