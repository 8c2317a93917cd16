#![allow(dead_code)]

use jobly::{Company, Job, NewCompany, NewJob};
use rust_decimal::Decimal;
use tokio_postgres::Transaction;

/// Connect via `DATABASE_URL`; `None` skips database-backed tests.
pub async fn try_connect() -> Option<tokio_postgres::Client> {
    let _ = dotenvy::dotenv();
    let database_url = std::env::var("DATABASE_URL").ok()?;
    let (client, connection) = tokio_postgres::connect(&database_url, tokio_postgres::NoTls)
        .await
        .expect("Failed to connect to DATABASE_URL with NoTls");
    tokio::spawn(async move {
        if let Err(e) = connection.await {
            eprintln!("tokio-postgres connection error: {e}");
        }
    });
    Some(client)
}

// Temporary tables shadow any real ones and vanish on rollback.
const SCHEMA: &str = r#"
CREATE TEMPORARY TABLE companies (
    handle VARCHAR(25) PRIMARY KEY CHECK (handle = lower(handle)),
    name TEXT UNIQUE NOT NULL,
    num_employees INTEGER CHECK (num_employees >= 0),
    description TEXT NOT NULL,
    logo_url TEXT
);

CREATE TEMPORARY TABLE jobs (
    id SERIAL PRIMARY KEY,
    title TEXT NOT NULL,
    salary INTEGER CHECK (salary >= 0),
    equity NUMERIC CHECK (equity <= 1.0),
    company_handle VARCHAR(25) NOT NULL
        REFERENCES companies ON DELETE CASCADE
);

CREATE TEMPORARY TABLE users (
    username VARCHAR(25) PRIMARY KEY,
    password TEXT NOT NULL,
    first_name TEXT NOT NULL,
    last_name TEXT NOT NULL,
    email TEXT NOT NULL CHECK (position('@' IN email) > 1),
    is_admin BOOLEAN NOT NULL DEFAULT FALSE
);

CREATE TEMPORARY TABLE applications (
    username VARCHAR(25)
        REFERENCES users ON DELETE CASCADE,
    job_id INTEGER
        REFERENCES jobs ON DELETE CASCADE,
    PRIMARY KEY (username, job_id)
);
"#;

/// Ids of the seeded jobs, in creation order (j1, j2, j3).
pub struct Seeded {
    pub job_ids: Vec<i32>,
}

/// Create the schema and the shared fixture rows inside `tx`.
pub async fn seed(tx: &Transaction<'_>) -> Seeded {
    tx.batch_execute(SCHEMA).await.expect("create schema");

    for n in 1..=3 {
        Company::create(
            tx,
            &NewCompany {
                handle: format!("c{n}"),
                name: format!("C{n}"),
                description: format!("Desc{n}"),
                num_employees: Some(n),
                logo_url: Some(format!("http://c{n}.img")),
            },
        )
        .await
        .expect("create company");
    }

    for (username, first, last, email, is_admin) in [
        ("u1", "U1F", "U1L", "u1@email.com", false),
        ("u2", "U2F", "U2L", "u2@email.com", false),
        ("admin", "Admin", "User", "admin@user.com", true),
    ] {
        tx.execute(
            "INSERT INTO users (username, password, first_name, last_name, email, is_admin) \
             VALUES ($1, 'not-a-real-hash', $2, $3, $4, $5)",
            &[&username, &first, &last, &email, &is_admin],
        )
        .await
        .expect("create user");
    }

    let mut job_ids = Vec::new();
    for (title, salary, equity, handle) in [
        ("j1", 100000, Decimal::new(1, 1), "c1"),
        ("j2", 80000, Decimal::ZERO, "c1"),
        ("j3", 150000, Decimal::new(2, 1), "c2"),
    ] {
        let job = Job::create(
            tx,
            &NewJob::new(title, handle).salary(salary).equity(equity),
        )
        .await
        .expect("create job");
        job_ids.push(job.id);
    }

    tx.execute(
        "INSERT INTO applications (username, job_id) VALUES ('u1', $1)",
        &[&job_ids[0]],
    )
    .await
    .expect("create application");

    Seeded { job_ids }
}
