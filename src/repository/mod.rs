//! Repository layer for database operations

pub mod authors;
pub mod book_instances;
pub mod books;
pub mod genres;
pub mod users;

use std::sync::Arc;

use sqlx::{Pool, Postgres};

pub use authors::AuthorRepository;
pub use book_instances::BookInstanceRepository;
pub use books::BookRepository;
pub use genres::GenreRepository;
pub use users::UserRepository;

/// Main repository struct holding one store per entity
#[derive(Clone)]
pub struct Repository {
    pub authors: Arc<dyn AuthorRepository>,
    pub books: Arc<dyn BookRepository>,
    pub genres: Arc<dyn GenreRepository>,
    pub book_instances: Arc<dyn BookInstanceRepository>,
    pub users: Arc<dyn UserRepository>,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            authors: Arc::new(authors::PgAuthorRepository::new(pool.clone())),
            books: Arc::new(books::PgBookRepository::new(pool.clone())),
            genres: Arc::new(genres::PgGenreRepository::new(pool.clone())),
            book_instances: Arc::new(book_instances::PgBookInstanceRepository::new(pool.clone())),
            users: Arc::new(users::PgUserRepository::new(pool)),
        }
    }
}

/// Mock stores for service tests; calls without an expectation panic
#[cfg(test)]
#[derive(Default)]
pub(crate) struct MockRepository {
    pub authors: authors::MockAuthorRepository,
    pub books: books::MockBookRepository,
    pub genres: genres::MockGenreRepository,
    pub book_instances: book_instances::MockBookInstanceRepository,
    pub users: users::MockUserRepository,
}

#[cfg(test)]
impl MockRepository {
    pub fn build(self) -> Repository {
        Repository {
            authors: Arc::new(self.authors),
            books: Arc::new(self.books),
            genres: Arc::new(self.genres),
            book_instances: Arc::new(self.book_instances),
            users: Arc::new(self.users),
        }
    }
}
