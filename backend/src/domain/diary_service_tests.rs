//! Tests for the diary service.

use std::sync::Arc;

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};
use mockall::predicate::eq;
use rstest::rstest;

use super::*;
use crate::domain::ports::MockDiaryRepository;
use crate::domain::{DiaryContent, DiaryTitle, ErrorKind};

struct FixtureClock {
    utc_now: DateTime<Utc>,
}

impl Clock for FixtureClock {
    fn local(&self) -> DateTime<Local> {
        self.utc_now.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.utc_now
    }
}

/// Noon UTC on 2024-03-25 is 2024-03-25 or 2024-03-26 in every local zone.
fn fixture_clock() -> Arc<dyn Clock> {
    Arc::new(FixtureClock {
        utc_now: Utc
            .with_ymd_and_hms(2024, 3, 25, 12, 0, 0)
            .single()
            .expect("valid fixture timestamp"),
    })
}

fn member() -> MemberId {
    MemberId::new(1).expect("member id")
}

fn other_member() -> MemberId {
    MemberId::new(2).expect("member id")
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

fn at(date: NaiveDate, h: u32, min: u32) -> NaiveDateTime {
    date.and_hms_opt(h, min, 0).expect("valid time")
}

fn write_command(date: NaiveDate) -> WriteDiaryCommand {
    WriteDiaryCommand {
        title: DiaryTitle::new("Rainy Sunday").expect("title"),
        content: DiaryContent::new("Stayed in and read.").expect("content"),
        date,
    }
}

fn stored(id: i64, owner: MemberId, created_at: NaiveDateTime) -> Diary {
    Diary {
        id: DiaryId::new(id),
        created_by: owner,
        title: DiaryTitle::new("Stored").expect("title"),
        content: DiaryContent::new("Stored body").expect("content"),
        created_at,
    }
}

fn make_service(repo: MockDiaryRepository) -> DiaryService<MockDiaryRepository> {
    DiaryService::new(Arc::new(repo), fixture_clock())
}

#[tokio::test]
async fn write_rejects_day_that_already_has_an_entry() {
    let day = date(2024, 3, 24);
    let (start, end) = day_bounds(day);
    let mut repo = MockDiaryRepository::new();
    repo.expect_exists_on()
        .with(eq(member()), eq(start), eq(end))
        .times(1)
        .return_once(|_, _, _| Ok(true));
    repo.expect_save().never();

    let error = make_service(repo)
        .write(member(), write_command(day))
        .await
        .expect_err("duplicate day");

    assert_eq!(
        error.kind(),
        ErrorKind::Business(BusinessCode::DiaryAlreadyWritten)
    );
    assert_eq!(error.code(), 409);
}

#[tokio::test]
async fn write_saves_exactly_once_on_a_fresh_day() {
    let day = date(2024, 3, 24);
    let mut repo = MockDiaryRepository::new();
    repo.expect_exists_on()
        .times(1)
        .return_once(|_, _, _| Ok(false));
    repo.expect_save()
        .withf(move |draft| draft.created_by == member() && draft.day() == day)
        .times(1)
        .return_once(|draft| Ok(Diary::from_draft(DiaryId::new(10), draft.clone())));

    let diary = make_service(repo)
        .write(member(), write_command(day))
        .await
        .expect("diary saved");

    assert_eq!(diary.id, DiaryId::new(10));
    assert_eq!(diary.day(), day);
    assert_eq!(diary.title.as_str(), "Rainy Sunday");
}

#[tokio::test]
async fn write_stamps_the_requested_day_with_the_current_local_time() {
    let clock = fixture_clock();
    let expected_time = clock.local().naive_local().time();
    let day = date(2024, 3, 1);
    let mut repo = MockDiaryRepository::new();
    repo.expect_exists_on().return_once(|_, _, _| Ok(false));
    repo.expect_save()
        .times(1)
        .return_once(|draft| Ok(Diary::from_draft(DiaryId::new(1), draft.clone())));

    let diary = DiaryService::new(Arc::new(repo), clock)
        .write(member(), write_command(day))
        .await
        .expect("diary saved");

    assert_eq!(diary.created_at, day.and_time(expected_time));
}

#[tokio::test]
async fn write_rejects_future_dates_without_touching_the_store() {
    let mut repo = MockDiaryRepository::new();
    repo.expect_exists_on().never();
    repo.expect_save().never();

    let error = make_service(repo)
        .write(member(), write_command(date(2024, 3, 28)))
        .await
        .expect_err("future date");

    assert_eq!(
        error.kind(),
        ErrorKind::Business(BusinessCode::FutureDiaryDate)
    );
}

#[tokio::test]
async fn write_maps_store_uniqueness_race_to_already_written() {
    let day = date(2024, 3, 24);
    let mut repo = MockDiaryRepository::new();
    repo.expect_exists_on().return_once(|_, _, _| Ok(false));
    repo.expect_save()
        .times(1)
        .return_once(move |_| Err(DiaryRepositoryError::duplicate_day(1_i64, day)));

    let error = make_service(repo)
        .write(member(), write_command(day))
        .await
        .expect_err("race lost");

    assert_eq!(
        error.kind(),
        ErrorKind::Business(BusinessCode::DiaryAlreadyWritten)
    );
}

#[rstest]
#[case(DiaryRepositoryError::connection("refused"), ErrorKind::Internal)]
#[case(DiaryRepositoryError::query("syntax"), ErrorKind::Internal)]
#[case(
    DiaryRepositoryError::constraint("title", "too long"),
    ErrorKind::ConstraintViolation
)]
#[tokio::test]
async fn write_maps_repository_failures(
    #[case] failure: DiaryRepositoryError,
    #[case] expected: ErrorKind,
) {
    let mut repo = MockDiaryRepository::new();
    repo.expect_exists_on().return_once(|_, _, _| Ok(false));
    repo.expect_save().return_once(move |_| Err(failure));

    let error = make_service(repo)
        .write(member(), write_command(date(2024, 3, 24)))
        .await
        .expect_err("repository failure");

    assert_eq!(error.kind(), expected);
}

#[tokio::test]
async fn constraint_failures_name_the_field() {
    let mut repo = MockDiaryRepository::new();
    repo.expect_exists_on().return_once(|_, _, _| Ok(false));
    repo.expect_save()
        .return_once(|_| Err(DiaryRepositoryError::constraint("title", "too long")));

    let error = make_service(repo)
        .write(member(), write_command(date(2024, 3, 24)))
        .await
        .expect_err("constraint");

    let [violation] = error.validations() else {
        panic!("expected one violation, got {:?}", error.validations());
    };
    assert_eq!(violation.field(), "title");
    assert_eq!(violation.message(), "too long");
}

#[tokio::test]
async fn find_returns_owned_entry() {
    let entry = stored(3, member(), at(date(2024, 3, 20), 8, 0));
    let expected = entry.clone();
    let mut repo = MockDiaryRepository::new();
    repo.expect_find_by_id()
        .with(eq(DiaryId::new(3)))
        .return_once(move |_| Ok(Some(entry)));

    let found = make_service(repo)
        .find(member(), DiaryId::new(3))
        .await
        .expect("found");
    assert_eq!(found, expected);
}

#[rstest]
#[case(None, BusinessCode::DiaryNotFound)]
#[case(Some(other_member()), BusinessCode::DiaryAccessDenied)]
#[tokio::test]
async fn find_rejects_missing_or_foreign_entries(
    #[case] owner: Option<MemberId>,
    #[case] expected: BusinessCode,
) {
    let mut repo = MockDiaryRepository::new();
    repo.expect_find_by_id()
        .return_once(move |id| Ok(owner.map(|o| stored(id.get(), o, at(date(2024, 3, 20), 8, 0)))));

    let error = make_service(repo)
        .find(member(), DiaryId::new(4))
        .await
        .expect_err("not accessible");
    assert_eq!(error.kind(), ErrorKind::Business(expected));
}

#[tokio::test]
async fn list_covers_whole_days_of_the_period() {
    let from = date(2024, 3, 1);
    let to = date(2024, 3, 31);
    let (start, _) = day_bounds(from);
    let (_, end) = day_bounds(to);
    let mut repo = MockDiaryRepository::new();
    repo.expect_find_between()
        .with(eq(member()), eq(start), eq(end))
        .times(1)
        .return_once(|owner, _, _| Ok(vec![stored(1, owner, at(date(2024, 3, 2), 9, 0))]));

    let period = DiaryPeriod::new(from, to).expect("period");
    let entries = make_service(repo)
        .list(member(), period)
        .await
        .expect("listed");
    assert_eq!(entries.len(), 1);
}

#[tokio::test]
async fn update_replaces_title_and_content_but_keeps_the_day() {
    let created_at = at(date(2024, 3, 20), 22, 15);
    let mut repo = MockDiaryRepository::new();
    repo.expect_find_by_id()
        .return_once(move |id| Ok(Some(stored(id.get(), member(), created_at))));
    repo.expect_update()
        .times(1)
        .return_once(|diary| Ok(Some(diary.clone())));

    let command = UpdateDiaryCommand {
        title: DiaryTitle::new("Edited").expect("title"),
        content: DiaryContent::new("Edited body").expect("content"),
    };
    let updated = make_service(repo)
        .update(member(), DiaryId::new(5), command)
        .await
        .expect("updated");

    assert_eq!(updated.title.as_str(), "Edited");
    assert_eq!(updated.created_at, created_at);
}

#[tokio::test]
async fn update_of_foreign_entry_is_denied() {
    let mut repo = MockDiaryRepository::new();
    repo.expect_find_by_id()
        .return_once(|id| Ok(Some(stored(id.get(), other_member(), at(date(2024, 3, 20), 7, 0)))));
    repo.expect_update().never();

    let command = UpdateDiaryCommand {
        title: DiaryTitle::new("Edited").expect("title"),
        content: DiaryContent::new("Edited body").expect("content"),
    };
    let error = make_service(repo)
        .update(member(), DiaryId::new(5), command)
        .await
        .expect_err("denied");
    assert_eq!(
        error.kind(),
        ErrorKind::Business(BusinessCode::DiaryAccessDenied)
    );
}

#[rstest]
#[case(true, None)]
#[case(false, Some(BusinessCode::DiaryNotFound))]
#[tokio::test]
async fn delete_reports_whether_the_entry_was_removed(
    #[case] removed: bool,
    #[case] expected: Option<BusinessCode>,
) {
    let mut repo = MockDiaryRepository::new();
    repo.expect_find_by_id()
        .return_once(|id| Ok(Some(stored(id.get(), member(), at(date(2024, 3, 20), 7, 0)))));
    repo.expect_delete()
        .with(eq(DiaryId::new(6)))
        .times(1)
        .return_once(move |_| Ok(removed));

    let result = make_service(repo).delete(member(), DiaryId::new(6)).await;
    match expected {
        None => result.expect("deleted"),
        Some(code) => {
            let error = result.expect_err("already gone");
            assert_eq!(error.kind(), ErrorKind::Business(code));
        }
    }
}
