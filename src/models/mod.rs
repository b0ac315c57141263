//! Data models for the Local Library catalog

pub mod author;
pub mod book;
pub mod book_instance;
pub mod form;
pub mod genre;
pub mod pagination;
pub mod user;

// Re-export commonly used types
pub use author::{Author, AuthorDetails, AuthorForm};
pub use book::{Book, BookDetails, BookForm, BookUpdateForm};
pub use book_instance::{BookInstance, LoanStatus, LoanedCopy, RenewBookForm};
pub use form::FormOutcome;
pub use genre::Genre;
pub use pagination::{Page, PageQuery, PageWindow};
pub use user::{Caller, Permission, User, UserClaims};
