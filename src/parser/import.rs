//! `import` declaration parsing (spec §4.4).
//!
//! Grammar:
//! ```text
//! import-decl := 'import' import-body ';'
//! import-body := STRING                     # path
//!              | STRING 'as' IDENT          # path aliased
//!              | IDENT                      # named
//!              | IDENT 'as' IDENT           # named aliased
//!              | IDENT '::' …
//!              | IDENT 'as' IDENT 'from' …  # reserved, not yet implemented
//! ```
//!
//! Grounded in `original_source/choir/lib/Laye/Parser.cc`'s `parse_import`
//! for the production shapes, and in the donor's
//! `src/syntax/parser/statement.rs` for the recursive-descent error-recovery
//! idiom (`expect`, skip-to-sync-point, wrap skipped tokens in an error
//! node).

use crate::lexer::TokenKind;
use crate::module::{NodeId, SyntaxNode};

use super::Parser;

impl<'m, 'arena> Parser<'m, 'arena> {
    /// Parses one `import ...;` declaration. Assumes the current token is
    /// `import`.
    pub fn parse_import(&mut self) -> NodeId {
        let token_import = self.advance();

        match self.current_kind() {
            TokenKind::LiteralString => {
                let token_path = self.advance();
                if self.current_kind() == TokenKind::Identifier && self.current_text_is("as") {
                    let token_as = self.rewrite_contextual_keyword(TokenKind::As);
                    let token_alias_ident = self.expect(TokenKind::Identifier);
                    let token_semi = self.expect(TokenKind::SemiColon);
                    return self.push_node(SyntaxNode::ImportPathSimpleAliased {
                        token_import,
                        token_path,
                        token_as,
                        token_alias_ident,
                        token_semi,
                    });
                }
                let token_semi = self.expect(TokenKind::SemiColon);
                self.push_node(SyntaxNode::ImportPathSimple {
                    token_import,
                    token_path,
                    token_semi,
                })
            }

            TokenKind::Identifier => {
                // `::` and `as ... from ...` forms are reserved but not
                // implemented (Open Question (c)): recognize them, report,
                // and fall into the same recovery as any other malformed
                // import rather than silently mis-parsing them as a named
                // import.
                if self.peek_kind(1) == TokenKind::ColonColon {
                    return self.reject_unimplemented_import(token_import, "import foo::bar is not yet implemented");
                }
                if self.peek_kind(1) == TokenKind::Identifier && self.peek_text_is(1, "as") && self.peek_kind(3) == TokenKind::Identifier && self.peek_text_is(3, "from") {
                    return self.reject_unimplemented_import(
                        token_import,
                        "import foo as bar from ... is not yet implemented",
                    );
                }

                let token_name = self.advance();
                if self.current_kind() == TokenKind::Identifier && self.current_text_is("as") {
                    let token_as = self.rewrite_contextual_keyword(TokenKind::As);
                    let token_alias_ident = self.expect(TokenKind::Identifier);
                    let token_semi = self.expect(TokenKind::SemiColon);
                    return self.push_node(SyntaxNode::ImportNamedSimpleAliased {
                        token_import,
                        token_name,
                        token_as,
                        token_alias_ident,
                        token_semi,
                    });
                }
                let token_semi = self.expect(TokenKind::SemiColon);
                self.push_node(SyntaxNode::ImportNamedSimple {
                    token_import,
                    token_name,
                    token_semi,
                })
            }

            _ => {
                self.error_here("expected a string or identifier after 'import'");
                self.recover_invalid_import(token_import)
            }
        }
    }

    fn reject_unimplemented_import(&mut self, token_import: super::TokenId, message: &str) -> NodeId {
        self.error_here(message);
        self.recover_invalid_import(token_import)
    }

    /// Consumes tokens until a declaration/statement boundary (spec §4.4
    /// "packaging skipped tokens into an error node"), then emits
    /// `ImportInvalidWithTokens`.
    fn recover_invalid_import(&mut self, token_import: super::TokenId) -> NodeId {
        let mut consumed_tokens = Vec::new();
        while !self.at_decl_or_stmt_boundary() {
            consumed_tokens.push(self.advance());
        }
        let token_semi = if self.current_kind() == TokenKind::SemiColon {
            self.advance()
        } else {
            self.sentinel()
        };
        self.push_node(SyntaxNode::ImportInvalidWithTokens {
            token_import,
            consumed_tokens,
            token_semi,
        })
    }
}
