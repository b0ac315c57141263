//! API integration tests
//!
//! The router tests run against in-memory stores. The live tests at the
//! bottom need a running server with seeded data.

mod support;

use chrono::{Duration, Local};
use reqwest::Client;
use serde_json::{json, Value};

use locallibrary_server::models::book_instance::LoanStatus;
use support::TestApp;

fn today() -> chrono::NaiveDate {
    Local::now().date_naive()
}

#[tokio::test]
async fn test_book_listing_pages() {
    let app = TestApp::new();
    app.seed(|data| {
        for title in ["Dune", "Emma", "Ulysses", "Beloved", "Ubik"] {
            data.add_book(title, None, Vec::new());
        }
    });

    let first = app.get("/api/v1/books", None).await;
    assert_eq!(first.status, 200);
    assert_eq!(first.body["items"].as_array().unwrap().len(), 2);
    assert_eq!(first.body["num_pages"], 3);
    assert_eq!(first.body["has_next"], true);
    assert_eq!(first.body["has_previous"], false);

    let mut seen = 0;
    for page in 1..=3 {
        let response = app.get(&format!("/api/v1/books?page={}", page), None).await;
        let items = response.body["items"].as_array().unwrap().len();
        assert!(items <= 2);
        seen += items;
    }
    assert_eq!(seen, 5);

    let last = app.get("/api/v1/books?page=last", None).await;
    assert_eq!(last.body["page"], 3);
    assert_eq!(last.body["items"][0]["title"], "Ubik");

    assert_eq!(app.get("/api/v1/books?page=4", None).await.status, 404);
    assert_eq!(app.get("/api/v1/books?page=abc", None).await.status, 404);
}

#[tokio::test]
async fn test_empty_author_listing_has_one_page() {
    let app = TestApp::new();

    let response = app.get("/api/v1/authors", None).await;
    assert_eq!(response.status, 200);
    assert_eq!(response.body["num_pages"], 1);
    assert_eq!(response.body["total"], 0);
}

#[tokio::test]
async fn test_book_detail() {
    let app = TestApp::new();
    let book_id = app.seed(|data| {
        let author = data.add_author("Frank", "Herbert");
        let genre = data.add_genre("Science Fiction");
        let book = data.add_book("Dune", Some(author), vec![genre]);
        data.add_copy(book, LoanStatus::Available, None, None);
        book
    });

    let response = app.get(&format!("/api/v1/books/{}", book_id), None).await;
    assert_eq!(response.status, 200);
    assert_eq!(response.body["title"], "Dune");
    assert_eq!(response.body["author"]["last_name"], "Herbert");
    assert_eq!(response.body["genres"][0]["name"], "Science Fiction");
    assert_eq!(response.body["copies"][0]["status"], "available");

    let missing = app.get("/api/v1/books/9999", None).await;
    assert_eq!(missing.status, 404);
    assert_eq!(missing.body["error"], "NoSuchRecord");
}

#[tokio::test]
async fn test_my_loans_redirects_anonymous_to_login() {
    let app = TestApp::new();

    let response = app.get("/api/v1/loans/mine", None).await;
    assert_eq!(response.status, 303);
    assert_eq!(
        response.location(),
        "/api/v1/auth/login?next=%2Fapi%2Fv1%2Floans%2Fmine"
    );
}

#[tokio::test]
async fn test_my_loans_only_lists_callers_copies_on_loan() {
    let app = TestApp::new();
    let (reader, other) = app.seed(|data| {
        let reader = data.add_user("reader", false, &[]);
        let other = data.add_user("other", false, &[]);
        let book = data.add_book("Dune", None, Vec::new());
        data.add_copy(book, LoanStatus::OnLoan, Some(today() + Duration::days(9)), Some(reader.id));
        data.add_copy(book, LoanStatus::OnLoan, Some(today() + Duration::days(2)), Some(reader.id));
        data.add_copy(book, LoanStatus::Reserved, Some(today()), Some(reader.id));
        data.add_copy(book, LoanStatus::OnLoan, Some(today()), Some(other.id));
        (reader, other)
    });

    let response = app.get("/api/v1/loans/mine", Some(&app.token(&reader))).await;
    assert_eq!(response.status, 200);

    let items = response.body["items"].as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert!(items.iter().all(|item| item["borrower_id"] == reader.id));
    assert!(items.iter().all(|item| item["borrower_id"] != other.id));
    assert!(items[0]["due_back"].as_str() < items[1]["due_back"].as_str());
}

#[tokio::test]
async fn test_all_loans_requires_staff_permission() {
    let app = TestApp::new();
    let (reader, librarian) = app.seed(|data| {
        let reader = data.add_user("reader", false, &[]);
        let librarian = data.add_user("librarian", false, &["catalog.can_mark_returned"]);
        let book = data.add_book("Dune", None, Vec::new());
        data.add_copy(book, LoanStatus::OnLoan, Some(today() + Duration::days(5)), Some(reader.id));
        data.add_copy(book, LoanStatus::OnLoan, None, Some(librarian.id));
        data.add_copy(book, LoanStatus::OnLoan, Some(today() - Duration::days(1)), Some(reader.id));
        data.add_copy(book, LoanStatus::Available, None, None);
        (reader, librarian)
    });

    assert_eq!(app.get("/api/v1/loans/all", None).await.status, 403);
    assert_eq!(app.get("/api/v1/loans/all", Some(&app.token(&reader))).await.status, 403);

    let response = app.get("/api/v1/loans/all", Some(&app.token(&librarian))).await;
    assert_eq!(response.status, 200);

    let items = response.body["items"].as_array().unwrap();
    assert_eq!(items.len(), 3);
    assert_eq!(items[0]["is_overdue"], true);
    assert_eq!(items[0]["borrower_username"], "reader");
    assert!(items[0]["due_back"].as_str() < items[1]["due_back"].as_str());
    assert!(items[2]["due_back"].is_null());
}

#[tokio::test]
async fn test_renewal_three_weeks_ahead_is_saved() {
    let app = TestApp::new();
    let stored = today() + Duration::days(1);
    let (librarian, copy) = app.seed(|data| {
        let librarian = data.add_user("librarian", false, &["catalog.can_mark_returned"]);
        let book = data.add_book("Dune", None, Vec::new());
        let copy = data.add_copy(book, LoanStatus::OnLoan, Some(stored), Some(librarian.id));
        (librarian, copy)
    });
    let token = app.token(&librarian);
    let uri = format!("/api/v1/book-instances/{}/renew", copy);
    let proposed = (today() + Duration::weeks(3)).format("%Y-%m-%d").to_string();

    let form = app.get(&uri, Some(&token)).await;
    assert_eq!(form.status, 200);
    assert_eq!(form.body["form"]["renewal_date"], proposed.as_str());
    assert_eq!(form.body["object"]["id"], copy.to_string());

    let response = app.post(&uri, Some(&token), json!({ "renewal_date": proposed })).await;
    assert_eq!(response.status, 303);
    assert_eq!(response.location(), "/api/v1/loans/all");

    let saved = app.seed(|data| data.copies.iter().find(|c| c.id == copy).unwrap().due_back);
    assert_eq!(saved, Some(today() + Duration::weeks(3)));
}

#[tokio::test]
async fn test_renewal_in_past_is_rejected() {
    let app = TestApp::new();
    let stored = today() + Duration::days(1);
    let (librarian, copy) = app.seed(|data| {
        let librarian = data.add_user("librarian", true, &[]);
        let book = data.add_book("Dune", None, Vec::new());
        let copy = data.add_copy(book, LoanStatus::OnLoan, Some(stored), None);
        (librarian, copy)
    });
    let uri = format!("/api/v1/book-instances/{}/renew", copy);
    let yesterday = (today() - Duration::days(1)).format("%Y-%m-%d").to_string();

    let response = app
        .post(&uri, Some(&app.token(&librarian)), json!({ "renewal_date": yesterday }))
        .await;
    assert_eq!(response.status, 422);
    assert_eq!(
        response.body["errors"]["renewal_date"][0],
        "Invalid date - renewal in past"
    );
    assert_eq!(response.body["form"]["renewal_date"], yesterday.as_str());

    let too_far = (today() + Duration::weeks(5)).format("%Y-%m-%d").to_string();
    let response = app
        .post(&uri, Some(&app.token(&librarian)), json!({ "renewal_date": too_far }))
        .await;
    assert_eq!(response.status, 422);
    assert_eq!(
        response.body["errors"]["renewal_date"][0],
        "Invalid date - renewal more than 4 weeks ahead"
    );

    let saved = app.seed(|data| data.copies[0].due_back);
    assert_eq!(saved, Some(stored));
}

#[tokio::test]
async fn test_renewal_guards() {
    let app = TestApp::new();
    let (reader, librarian, copy) = app.seed(|data| {
        let reader = data.add_user("reader", false, &[]);
        let librarian = data.add_user("librarian", false, &["catalog.can_mark_returned"]);
        let book = data.add_book("Dune", None, Vec::new());
        let copy = data.add_copy(book, LoanStatus::OnLoan, Some(today()), Some(reader.id));
        (reader, librarian, copy)
    });

    let uri = format!("/api/v1/book-instances/{}/renew", copy);
    assert_eq!(app.get(&uri, None).await.status, 403);
    assert_eq!(app.get(&uri, Some(&app.token(&reader))).await.status, 403);

    let token = app.token(&librarian);
    let unknown = format!("/api/v1/book-instances/{}/renew", uuid::Uuid::new_v4());
    assert_eq!(app.get(&unknown, Some(&token)).await.status, 404);
    assert_eq!(
        app.get("/api/v1/book-instances/not-a-uuid/renew", Some(&token)).await.status,
        404
    );
}

#[tokio::test]
async fn test_author_create_view_delete() {
    let app = TestApp::new();
    let librarian = app.seed(|data| {
        data.add_user(
            "librarian",
            false,
            &["catalog.add_author", "catalog.delete_author"],
        )
    });
    let token = app.token(&librarian);

    let form = app.get("/api/v1/authors/new", Some(&token)).await;
    assert_eq!(form.status, 200);
    assert_eq!(form.body["form"]["date_of_death"], "2016-12-10");

    let created = app
        .post(
            "/api/v1/authors",
            Some(&token),
            json!({ "first_name": "Jane", "last_name": "Doe" }),
        )
        .await;
    assert_eq!(created.status, 303);
    let detail_uri = created.location().to_string();
    assert!(detail_uri.starts_with("/api/v1/authors/"));

    let detail = app.get(&detail_uri, None).await;
    assert_eq!(detail.status, 200);
    assert_eq!(detail.body["first_name"], "Jane");
    assert_eq!(detail.body["last_name"], "Doe");

    let confirm = app.get(&format!("{}/delete", detail_uri), Some(&token)).await;
    assert_eq!(confirm.body["object"]["last_name"], "Doe");

    let deleted = app
        .post(&format!("{}/delete", detail_uri), Some(&token), json!({}))
        .await;
    assert_eq!(deleted.status, 303);
    assert_eq!(deleted.location(), "/api/v1/authors");

    assert_eq!(app.get(&detail_uri, None).await.status, 404);
    let listing = app.get("/api/v1/authors", None).await;
    assert!(listing.body["items"]
        .as_array()
        .unwrap()
        .iter()
        .all(|author| author["last_name"] != "Doe"));
}

#[tokio::test]
async fn test_author_form_errors() {
    let app = TestApp::new();
    let admin = app.seed(|data| data.add_user("admin", true, &[]));

    let response = app
        .post(
            "/api/v1/authors",
            Some(&app.token(&admin)),
            json!({ "first_name": "Jane", "date_of_birth": "1 May" }),
        )
        .await;
    assert_eq!(response.status, 422);
    assert!(response.body["errors"]["last_name"].is_array());
    assert_eq!(response.body["errors"]["date_of_birth"][0], "Enter a valid date.");
    assert_eq!(response.body["form"]["first_name"], "Jane");
    assert_eq!(app.seed(|data| data.authors.len()), 0);
}

#[tokio::test]
async fn test_author_views_need_permission() {
    let app = TestApp::new();
    let (reader, author) = app.seed(|data| {
        (data.add_user("reader", false, &[]), data.add_author("Jane", "Doe"))
    });

    assert_eq!(app.get("/api/v1/authors/new", None).await.status, 403);
    let response = app
        .post(
            &format!("/api/v1/authors/{}/delete", author),
            Some(&app.token(&reader)),
            json!({}),
        )
        .await;
    assert_eq!(response.status, 403);
    assert_eq!(app.seed(|data| data.authors.len()), 1);
}

#[tokio::test]
async fn test_deleting_author_keeps_books() {
    let app = TestApp::new();
    let (admin, author, book) = app.seed(|data| {
        let admin = data.add_user("admin", true, &[]);
        let author = data.add_author("Frank", "Herbert");
        let book = data.add_book("Dune", Some(author), Vec::new());
        (admin, author, book)
    });

    let response = app
        .post(&format!("/api/v1/authors/{}/delete", author), Some(&app.token(&admin)), json!({}))
        .await;
    assert_eq!(response.status, 303);

    let detail = app.get(&format!("/api/v1/books/{}", book), None).await;
    assert_eq!(detail.status, 200);
    assert!(detail.body["author"].is_null());
}

#[tokio::test]
async fn test_book_create_and_update() {
    let app = TestApp::new();
    let (admin, author, genre) = app.seed(|data| {
        (
            data.add_user("admin", true, &[]),
            data.add_author("Frank", "Herbert"),
            data.add_genre("Science Fiction"),
        )
    });
    let token = app.token(&admin);

    let form = app.get("/api/v1/books/new", Some(&token)).await;
    assert_eq!(form.body["form"]["language"], "Русский");

    let created = app
        .post(
            "/api/v1/books",
            Some(&token),
            json!({
                "title": "Dune",
                "author": author,
                "summary": "Spice",
                "genre": [genre],
                "isbn": "9780441013593",
                "language": "English"
            }),
        )
        .await;
    assert_eq!(created.status, 303);
    let detail_uri = created.location().to_string();

    let duplicate = app
        .post(
            "/api/v1/books",
            Some(&token),
            json!({
                "title": "Dune again",
                "author": author,
                "summary": "Spice",
                "genre": [genre],
                "isbn": "9780441013593",
                "language": "English"
            }),
        )
        .await;
    assert_eq!(duplicate.status, 422);
    assert!(duplicate.body["errors"]["isbn"].is_array());

    let updated = app
        .post(
            &format!("{}/edit", detail_uri),
            Some(&token),
            json!({ "author": null, "summary": "Sand", "genre": [genre], "language": "French" }),
        )
        .await;
    assert_eq!(updated.status, 303);
    assert_eq!(updated.location(), detail_uri);

    let detail = app.get(&detail_uri, None).await;
    assert_eq!(detail.body["title"], "Dune");
    assert_eq!(detail.body["summary"], "Sand");
    assert_eq!(detail.body["language"], "French");
}

#[tokio::test]
async fn test_book_with_copies_cannot_be_deleted() {
    let app = TestApp::new();
    let (admin, book) = app.seed(|data| {
        let admin = data.add_user("admin", true, &[]);
        let book = data.add_book("Dune", None, Vec::new());
        data.add_copy(book, LoanStatus::Available, None, None);
        (admin, book)
    });

    let response = app
        .post(&format!("/api/v1/books/{}/delete", book), Some(&app.token(&admin)), json!({}))
        .await;
    assert_eq!(response.status, 409);
    assert_eq!(app.seed(|data| data.books.len()), 1);
}

#[tokio::test]
async fn test_index_counts_visits_per_session() {
    let app = TestApp::new();
    app.seed(|data| {
        let book = data.add_book("Dune", None, Vec::new());
        data.add_copy(book, LoanStatus::Available, None, None);
        data.add_copy(book, LoanStatus::OnLoan, Some(today()), None);
        data.add_author("Frank", "Herbert");
    });

    let first = app.get("/api/v1/index", None).await;
    assert_eq!(first.status, 200);
    assert_eq!(first.body["num_books"], 1);
    assert_eq!(first.body["num_instances"], 2);
    assert_eq!(first.body["num_instances_available"], 1);
    assert_eq!(first.body["num_authors"], 1);
    assert_eq!(first.body["num_visits"], 0);

    let set_cookie = first.headers["set-cookie"].to_str().unwrap();
    let cookie = set_cookie.split(';').next().unwrap().to_string();
    assert!(cookie.starts_with("sessionid="));

    let second = app.get_with_cookie("/api/v1/index", &cookie).await;
    assert_eq!(second.body["num_visits"], 1);

    let stranger = app.get("/api/v1/index", None).await;
    assert_eq!(stranger.body["num_visits"], 0);
}

#[tokio::test]
async fn test_bad_token_is_unauthorized() {
    let app = TestApp::new();

    let response = app.get("/api/v1/loans/all", Some("not-a-jwt")).await;
    assert_eq!(response.status, 401);
    assert_eq!(response.body["error"], "NotAuthenticated");
}

#[tokio::test]
async fn test_health() {
    let app = TestApp::new();

    let response = app.get("/api/v1/health", None).await;
    assert_eq!(response.body["status"], "healthy");
    assert_eq!(app.get("/api/v1/ready", None).await.body["status"], "ready");
}

#[tokio::test]
async fn test_author_edit_and_update() {
    let app = TestApp::new();
    let (librarian, author) = app.seed(|data| {
        (
            data.add_user("librarian", false, &["catalog.change_author"]),
            data.add_author("Jane", "Doe"),
        )
    });
    let token = app.token(&librarian);
    let edit_uri = format!("/api/v1/authors/{}/edit", author);

    let form = app.get(&edit_uri, Some(&token)).await;
    assert_eq!(form.status, 200);
    assert_eq!(form.body["form"]["first_name"], "Jane");
    assert_eq!(form.body["form"]["last_name"], "Doe");
    assert_eq!(form.body["object"]["id"], author);

    assert_eq!(app.get("/api/v1/authors/9999/edit", Some(&token)).await.status, 404);

    let rejected = app
        .post(&edit_uri, Some(&token), json!({ "first_name": "Janet" }))
        .await;
    assert_eq!(rejected.status, 422);
    assert!(rejected.body["errors"]["last_name"].is_array());
    assert_eq!(rejected.body["form"]["first_name"], "Janet");
    assert_eq!(rejected.body["object"]["first_name"], "Jane");

    let updated = app
        .post(
            &edit_uri,
            Some(&token),
            json!({ "first_name": "Janet", "last_name": "Doe", "date_of_birth": "1950-03-01" }),
        )
        .await;
    assert_eq!(updated.status, 303);
    assert_eq!(updated.location(), format!("/api/v1/authors/{}", author));

    let detail = app.get(&format!("/api/v1/authors/{}", author), None).await;
    assert_eq!(detail.body["first_name"], "Janet");
    assert_eq!(detail.body["date_of_birth"], "1950-03-01");
    assert!(detail.body["date_of_death"].is_null());
}

#[tokio::test]
async fn test_book_edit_form_and_delete() {
    let app = TestApp::new();
    let (admin, author, genre, book) = app.seed(|data| {
        let admin = data.add_user("admin", true, &[]);
        let author = data.add_author("Frank", "Herbert");
        let genre = data.add_genre("Science Fiction");
        let book = data.add_book("Dune", Some(author), vec![genre]);
        (admin, author, genre, book)
    });
    let token = app.token(&admin);

    let form = app.get(&format!("/api/v1/books/{}/edit", book), Some(&token)).await;
    assert_eq!(form.status, 200);
    assert_eq!(form.body["form"]["author"], author);
    assert_eq!(form.body["form"]["genre"], json!([genre]));
    assert!(form.body["form"].get("title").is_none());
    assert_eq!(form.body["object"]["title"], "Dune");

    let deleted = app
        .post(&format!("/api/v1/books/{}/delete", book), Some(&token), json!({}))
        .await;
    assert_eq!(deleted.status, 303);
    assert_eq!(deleted.location(), "/api/v1/books");

    assert_eq!(app.get(&format!("/api/v1/books/{}", book), None).await.status, 404);
    assert_eq!(app.seed(|data| data.books.len()), 0);
}

#[tokio::test]
async fn test_form_posts_check_permission_before_reading_body() {
    let app = TestApp::new();
    let (reader, author, copy) = app.seed(|data| {
        let reader = data.add_user("reader", false, &[]);
        let author = data.add_author("Jane", "Doe");
        let book = data.add_book("Dune", Some(author), Vec::new());
        let copy = data.add_copy(book, LoanStatus::OnLoan, Some(today()), Some(reader.id));
        (reader, author, copy)
    });
    let token = app.token(&reader);

    assert_eq!(app.post_raw("/api/v1/authors", None, "").await.status, 403);
    assert_eq!(app.post_raw("/api/v1/books", Some(&token), "title=Dune").await.status, 403);
    assert_eq!(
        app.post("/api/v1/authors", Some(&token), json!({ "first_name": 5 }))
            .await
            .status,
        403
    );
    assert_eq!(
        app.post(
            &format!("/api/v1/authors/{}/edit", author),
            Some(&token),
            json!({ "last_name": [] }),
        )
        .await
        .status,
        403
    );
    assert_eq!(
        app.post(
            &format!("/api/v1/book-instances/{}/renew", copy),
            Some(&token),
            json!({ "renewal_date": 20240101 }),
        )
        .await
        .status,
        403
    );
    assert_eq!(app.seed(|data| data.authors.len()), 1);
}

#[tokio::test]
async fn test_mistyped_fields_come_back_as_form_errors() {
    let app = TestApp::new();
    let stored = today() + Duration::days(1);
    let (admin, book, copy) = app.seed(|data| {
        let admin = data.add_user("admin", true, &[]);
        let book = data.add_book("Dune", None, Vec::new());
        let copy = data.add_copy(book, LoanStatus::OnLoan, Some(stored), None);
        (admin, book, copy)
    });
    let token = app.token(&admin);

    let renewal = app
        .post(
            &format!("/api/v1/book-instances/{}/renew", copy),
            Some(&token),
            json!({ "renewal_date": 20240101 }),
        )
        .await;
    assert_eq!(renewal.status, 422);
    assert_eq!(renewal.body["errors"]["renewal_date"][0], "Enter a valid value.");
    assert_eq!(renewal.body["object"]["id"], copy.to_string());
    assert_eq!(app.seed(|data| data.copies[0].due_back), Some(stored));

    let update = app
        .post(
            &format!("/api/v1/books/{}/edit", book),
            Some(&token),
            json!({ "summary": "Sand", "genre": "fantasy", "language": "English" }),
        )
        .await;
    assert_eq!(update.status, 422);
    assert_eq!(update.body["errors"]["genre"][0], "Enter a valid value.");
    assert_eq!(update.body["form"]["summary"], "Sand");
    assert_eq!(update.body["object"]["title"], "Dune");

    let not_an_object = app.post_raw("/api/v1/authors", Some(&token), "[1, 2]").await;
    assert_eq!(not_an_object.status, 422);
    assert!(not_an_object.body["errors"]["__all__"].is_array());
    assert_eq!(app.seed(|data| data.authors.len()), 0);
}

#[tokio::test]
async fn test_non_numeric_ids_are_not_found() {
    let app = TestApp::new();
    let admin = app.seed(|data| data.add_user("admin", true, &[]));
    let token = app.token(&admin);

    let response = app.get("/api/v1/books/abc", None).await;
    assert_eq!(response.status, 404);
    assert_eq!(response.body["error"], "NoSuchRecord");

    assert_eq!(app.get("/api/v1/authors/abc", None).await.status, 404);
    assert_eq!(app.get("/api/v1/books/abc/edit", Some(&token)).await.status, 404);
    assert_eq!(app.get("/api/v1/authors/-1/delete", Some(&token)).await.status, 404);
    assert_eq!(
        app.post("/api/v1/books/1.5/delete", Some(&token), json!({})).await.status,
        404
    );
}

// ---------------------------------------------------------------------------
// Live server
// ---------------------------------------------------------------------------

const BASE_URL: &str = "http://localhost:8080/api/v1";

/// Helper to get an authenticated client
async fn get_auth_token(client: &Client) -> String {
    let response = client
        .post(format!("{}/auth/login", BASE_URL))
        .json(&json!({
            "username": "admin",
            "password": "admin"
        }))
        .send()
        .await
        .expect("Failed to send login request");

    let body: Value = response.json().await.expect("Failed to parse login response");
    body["token"].as_str().expect("No token in response").to_string()
}

#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored
async fn test_live_health_check() {
    let client = Client::new();

    let response = client
        .get(format!("{}/health", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
#[ignore]
async fn test_live_login_invalid_credentials() {
    let client = Client::new();

    let response = client
        .post(format!("{}/auth/login", BASE_URL))
        .json(&json!({
            "username": "admin",
            "password": "wrong"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 401);
}

#[tokio::test]
#[ignore]
async fn test_live_all_loans_as_admin() {
    let client = Client::new();
    let token = get_auth_token(&client).await;

    let response = client
        .get(format!("{}/loans/all", BASE_URL))
        .bearer_auth(&token)
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["items"].is_array());
}
