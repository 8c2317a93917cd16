mod common;

use jobly::{Job, JobFilter, JobPatch, JoblyError, NewJob};
use rust_decimal::Decimal;

fn job(id: i32, title: &str, salary: i32, equity: Decimal, handle: &str) -> Job {
    Job {
        id,
        title: title.to_string(),
        salary: Some(salary),
        equity: Some(equity),
        company_handle: handle.to_string(),
    }
}

#[tokio::test]
async fn create_works() {
    let Some(mut client) = common::try_connect().await else {
        return;
    };
    let tx = client.transaction().await.unwrap();
    common::seed(&tx).await;

    let created = Job::create(
        &tx,
        &NewJob::new("New Job", "c1")
            .salary(100000)
            .equity(Decimal::new(1, 1)),
    )
    .await
    .unwrap();

    assert_eq!(created.title, "New Job");
    assert_eq!(created.salary, Some(100000));
    assert_eq!(created.equity, Some(Decimal::new(1, 1)));
    assert_eq!(created.company_handle, "c1");
    assert_eq!(Job::get(&tx, created.id).await.unwrap(), created);

    tx.rollback().await.unwrap();
}

#[tokio::test]
async fn create_for_unknown_company_fails() {
    let Some(mut client) = common::try_connect().await else {
        return;
    };
    let tx = client.transaction().await.unwrap();
    common::seed(&tx).await;

    let err = Job::create(&tx, &NewJob::new("Ghost", "nope"))
        .await
        .unwrap_err();
    assert!(matches!(err, JoblyError::ForeignKeyViolation(_)));

    tx.rollback().await.unwrap();
}

#[tokio::test]
async fn find_all_without_filter() {
    let Some(mut client) = common::try_connect().await else {
        return;
    };
    let tx = client.transaction().await.unwrap();
    let ids = common::seed(&tx).await.job_ids;

    let jobs = Job::find_all(&tx, None).await.unwrap();
    assert_eq!(
        jobs,
        vec![
            job(ids[0], "j1", 100000, Decimal::new(1, 1), "c1"),
            job(ids[1], "j2", 80000, Decimal::ZERO, "c1"),
            job(ids[2], "j3", 150000, Decimal::new(2, 1), "c2"),
        ]
    );

    // An empty filter is the same as none.
    let same = Job::find_all(&tx, Some(&JobFilter::new())).await.unwrap();
    assert_eq!(same, jobs);

    tx.rollback().await.unwrap();
}

#[tokio::test]
async fn find_all_by_title() {
    let Some(mut client) = common::try_connect().await else {
        return;
    };
    let tx = client.transaction().await.unwrap();
    let ids = common::seed(&tx).await.job_ids;

    let jobs = Job::find_all(&tx, Some(&JobFilter::new().title("J1")))
        .await
        .unwrap();
    assert_eq!(jobs, vec![job(ids[0], "j1", 100000, Decimal::new(1, 1), "c1")]);

    tx.rollback().await.unwrap();
}

#[tokio::test]
async fn find_all_by_min_salary() {
    let Some(mut client) = common::try_connect().await else {
        return;
    };
    let tx = client.transaction().await.unwrap();
    common::seed(&tx).await;

    let jobs = Job::find_all(&tx, Some(&JobFilter::new().min_salary(100000)))
        .await
        .unwrap();
    let titles: Vec<_> = jobs.iter().map(|j| j.title.as_str()).collect();
    assert_eq!(titles, ["j1", "j3"]);

    tx.rollback().await.unwrap();
}

#[tokio::test]
async fn find_all_by_equity() {
    let Some(mut client) = common::try_connect().await else {
        return;
    };
    let tx = client.transaction().await.unwrap();
    common::seed(&tx).await;

    let jobs = Job::find_all(&tx, Some(&JobFilter::new().has_equity(true)))
        .await
        .unwrap();
    let titles: Vec<_> = jobs.iter().map(|j| j.title.as_str()).collect();
    assert_eq!(titles, ["j1", "j3"]);

    let jobs = Job::find_all(&tx, Some(&JobFilter::new().has_equity(false)))
        .await
        .unwrap();
    assert_eq!(jobs.len(), 3);

    tx.rollback().await.unwrap();
}

#[tokio::test]
async fn find_all_with_every_filter() {
    let Some(mut client) = common::try_connect().await else {
        return;
    };
    let tx = client.transaction().await.unwrap();
    common::seed(&tx).await;

    let filter = JobFilter::new().title("j").min_salary(100000).has_equity(true);
    let titles: Vec<_> = Job::find_all(&tx, Some(&filter))
        .await
        .unwrap()
        .into_iter()
        .map(|j| j.title)
        .collect();
    assert_eq!(titles, ["j1", "j3"]);

    let filter = JobFilter::from_query_pairs([("minSalary", "150000"), ("hasEquity", "true")])
        .unwrap();
    let jobs = Job::find_all(&tx, Some(&filter)).await.unwrap();
    assert_eq!(jobs.len(), 1);
    assert_eq!(jobs[0].title, "j3");

    tx.rollback().await.unwrap();
}

#[tokio::test]
async fn get_missing_job_is_not_found() {
    let Some(mut client) = common::try_connect().await else {
        return;
    };
    let tx = client.transaction().await.unwrap();
    common::seed(&tx).await;

    let err = Job::get(&tx, 0).await.unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(err.to_string(), "Not found: No job: 0");

    tx.rollback().await.unwrap();
}

#[tokio::test]
async fn update_works() {
    let Some(mut client) = common::try_connect().await else {
        return;
    };
    let tx = client.transaction().await.unwrap();
    let ids = common::seed(&tx).await.job_ids;

    let patch = JobPatch::new()
        .title("Updated")
        .salary(120000)
        .equity(Decimal::new(15, 2));
    let updated = Job::update(&tx, ids[0], &patch).await.unwrap();
    assert_eq!(
        updated,
        job(ids[0], "Updated", 120000, Decimal::new(15, 2), "c1")
    );

    // Untouched fields keep their values.
    let updated = Job::update(&tx, ids[1], &JobPatch::new().title("Renamed"))
        .await
        .unwrap();
    assert_eq!(updated, job(ids[1], "Renamed", 80000, Decimal::ZERO, "c1"));

    tx.rollback().await.unwrap();
}

#[tokio::test]
async fn update_missing_job_is_not_found() {
    let Some(mut client) = common::try_connect().await else {
        return;
    };
    let tx = client.transaction().await.unwrap();
    common::seed(&tx).await;

    let err = Job::update(&tx, 0, &JobPatch::new().title("nope"))
        .await
        .unwrap_err();
    assert!(err.is_not_found());

    tx.rollback().await.unwrap();
}

#[tokio::test]
async fn update_rejects_company_handle_and_empty_patch() {
    let Some(mut client) = common::try_connect().await else {
        return;
    };
    let tx = client.transaction().await.unwrap();
    let ids = common::seed(&tx).await.job_ids;

    let patch = JobPatch {
        company_handle: Some("invalid".into()),
        ..Default::default()
    };
    assert!(Job::update(&tx, ids[0], &patch).await.unwrap_err().is_invalid_input());
    assert!(
        Job::update(&tx, ids[0], &JobPatch::new())
            .await
            .unwrap_err()
            .is_invalid_input()
    );

    tx.rollback().await.unwrap();
}

#[tokio::test]
async fn remove_works() {
    let Some(mut client) = common::try_connect().await else {
        return;
    };
    let tx = client.transaction().await.unwrap();
    let ids = common::seed(&tx).await.job_ids;

    Job::remove(&tx, ids[0]).await.unwrap();
    assert!(Job::get(&tx, ids[0]).await.unwrap_err().is_not_found());
    assert!(Job::remove(&tx, ids[0]).await.unwrap_err().is_not_found());

    tx.rollback().await.unwrap();
}
