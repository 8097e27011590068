mod cursor;
mod error;
mod lexer;
mod token;

pub use cursor::Cursor;
pub use error::LexError;
pub use lexer::{Lexer, MAX_IDENT_LEN};
pub use token::{Literal, Token, TokenKind};
