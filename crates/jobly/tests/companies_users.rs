mod common;

use jobly::{
    Application, Company, CompanyFilter, CompanyPatch, JoblyError, NewCompany, User, UserPatch,
};

#[tokio::test]
async fn company_create_rejects_duplicate_handle() {
    let Some(mut client) = common::try_connect().await else {
        return;
    };
    let tx = client.transaction().await.unwrap();
    common::seed(&tx).await;

    let new = NewCompany {
        handle: "c1".into(),
        name: "Another".into(),
        description: "dup".into(),
        num_employees: None,
        logo_url: None,
    };
    let err = Company::create(&tx, &new).await.unwrap_err();
    assert!(err.is_invalid_input());
    assert!(err.to_string().contains("Duplicate company: c1"));

    tx.rollback().await.unwrap();
}

#[tokio::test]
async fn company_find_all_filters() {
    let Some(mut client) = common::try_connect().await else {
        return;
    };
    let tx = client.transaction().await.unwrap();
    common::seed(&tx).await;

    let all = Company::find_all(&tx, None).await.unwrap();
    let handles: Vec<_> = all.iter().map(|c| c.handle.as_str()).collect();
    assert_eq!(handles, ["c1", "c2", "c3"]);

    let filter = CompanyFilter::new().min_employees(2).max_employees(2);
    let some = Company::find_all(&tx, Some(&filter)).await.unwrap();
    assert_eq!(some.len(), 1);
    assert_eq!(some[0].handle, "c2");

    let bad = CompanyFilter::new().min_employees(3).max_employees(1);
    assert!(Company::find_all(&tx, Some(&bad)).await.unwrap_err().is_invalid_input());

    tx.rollback().await.unwrap();
}

#[tokio::test]
async fn company_get_includes_jobs() {
    let Some(mut client) = common::try_connect().await else {
        return;
    };
    let tx = client.transaction().await.unwrap();
    let ids = common::seed(&tx).await.job_ids;

    let detail = Company::get(&tx, "c1").await.unwrap();
    assert_eq!(detail.company.name, "C1");
    let job_ids: Vec<_> = detail.jobs.iter().map(|j| j.id).collect();
    assert_eq!(job_ids, [ids[0], ids[1]]);

    assert!(Company::get(&tx, "nope").await.unwrap_err().is_not_found());

    tx.rollback().await.unwrap();
}

#[tokio::test]
async fn company_update_and_remove() {
    let Some(mut client) = common::try_connect().await else {
        return;
    };
    let tx = client.transaction().await.unwrap();
    common::seed(&tx).await;

    let patch = CompanyPatch {
        num_employees: Some(10),
        logo_url: Some("http://new.img".into()),
        ..Default::default()
    };
    let updated = Company::update(&tx, "c1", &patch).await.unwrap();
    assert_eq!(updated.num_employees, Some(10));
    assert_eq!(updated.logo_url.as_deref(), Some("http://new.img"));
    assert_eq!(updated.name, "C1");

    assert!(
        Company::update(&tx, "nope", &patch)
            .await
            .unwrap_err()
            .is_not_found()
    );

    Company::remove(&tx, "c3").await.unwrap();
    assert!(Company::remove(&tx, "c3").await.unwrap_err().is_not_found());

    tx.rollback().await.unwrap();
}

#[tokio::test]
async fn user_get_lists_applications() {
    let Some(mut client) = common::try_connect().await else {
        return;
    };
    let tx = client.transaction().await.unwrap();
    let ids = common::seed(&tx).await.job_ids;

    let detail = User::get(&tx, "u1").await.unwrap();
    assert_eq!(detail.user.first_name, "U1F");
    assert!(!detail.user.is_admin);
    assert_eq!(detail.applications, vec![ids[0]]);

    let users = User::find_all(&tx).await.unwrap();
    let names: Vec<_> = users.iter().map(|u| u.username.as_str()).collect();
    assert_eq!(names, ["admin", "u1", "u2"]);

    tx.rollback().await.unwrap();
}

#[tokio::test]
async fn user_update_maps_columns() {
    let Some(mut client) = common::try_connect().await else {
        return;
    };
    let tx = client.transaction().await.unwrap();
    common::seed(&tx).await;

    let patch = UserPatch {
        first_name: Some("Aliya".into()),
        is_admin: Some(true),
        ..Default::default()
    };
    let user = User::update(&tx, "u2", &patch).await.unwrap();
    assert_eq!(user.first_name, "Aliya");
    assert_eq!(user.last_name, "U2L");
    assert!(user.is_admin);

    assert!(
        User::update(&tx, "u2", &UserPatch::default())
            .await
            .unwrap_err()
            .is_invalid_input()
    );
    assert!(User::update(&tx, "ghost", &patch).await.unwrap_err().is_not_found());

    User::remove(&tx, "u2").await.unwrap();
    assert!(User::get(&tx, "u2").await.unwrap_err().is_not_found());

    tx.rollback().await.unwrap();
}

#[tokio::test]
async fn apply_to_job() {
    let Some(mut client) = common::try_connect().await else {
        return;
    };
    let tx = client.transaction().await.unwrap();
    let ids = common::seed(&tx).await.job_ids;

    let app = User::apply_to_job(&tx, "u2", ids[2]).await.unwrap();
    assert_eq!(
        app,
        Application {
            username: "u2".into(),
            job_id: ids[2]
        }
    );
    assert_eq!(
        Application::job_ids_for_user(&tx, "u2").await.unwrap(),
        vec![ids[2]]
    );

    assert!(
        Application::create(&tx, "u2", 0)
            .await
            .unwrap_err()
            .is_not_found()
    );
    assert!(
        Application::create(&tx, "ghost", ids[0])
            .await
            .unwrap_err()
            .is_not_found()
    );

    // Applying twice violates the primary key.
    let err = Application::create(&tx, "u1", ids[0]).await.unwrap_err();
    assert!(matches!(err, JoblyError::UniqueViolation(_)));

    tx.rollback().await.unwrap();
}
