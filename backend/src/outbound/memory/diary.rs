//! Mutex-guarded diary store.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::NaiveDateTime;

use crate::domain::ports::{DiaryRepository, DiaryRepositoryError};
use crate::domain::{Diary, DiaryDraft, DiaryId, MemberId};

#[derive(Debug, Default)]
struct Store {
    next_id: i64,
    rows: BTreeMap<i64, Diary>,
}

/// In-memory implementation of the `DiaryRepository` port.
#[derive(Debug, Default)]
pub struct InMemoryDiaryRepository {
    store: Mutex<Store>,
}

impl InMemoryDiaryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Store>, DiaryRepositoryError> {
        self.store
            .lock()
            .map_err(|_| DiaryRepositoryError::query("diary store poisoned"))
    }
}

#[async_trait]
impl DiaryRepository for InMemoryDiaryRepository {
    async fn exists_on(
        &self,
        owner: MemberId,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Result<bool, DiaryRepositoryError> {
        let store = self.lock()?;
        Ok(store.rows.values().any(|diary| {
            diary.is_owned_by(owner) && (start..=end).contains(&diary.created_at)
        }))
    }

    async fn save(&self, draft: &DiaryDraft) -> Result<Diary, DiaryRepositoryError> {
        let mut store = self.lock()?;
        let day = draft.day();
        let clash = store
            .rows
            .values()
            .any(|diary| diary.is_owned_by(draft.created_by) && diary.day() == day);
        if clash {
            return Err(DiaryRepositoryError::duplicate_day(
                draft.created_by.get(),
                day,
            ));
        }

        store.next_id += 1;
        let id = store.next_id;
        let diary = Diary::from_draft(DiaryId::new(id), draft.clone());
        store.rows.insert(id, diary.clone());
        Ok(diary)
    }

    async fn find_by_id(&self, id: DiaryId) -> Result<Option<Diary>, DiaryRepositoryError> {
        Ok(self.lock()?.rows.get(&id.get()).cloned())
    }

    async fn find_between(
        &self,
        owner: MemberId,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Result<Vec<Diary>, DiaryRepositoryError> {
        let store = self.lock()?;
        let mut found: Vec<Diary> = store
            .rows
            .values()
            .filter(|diary| diary.is_owned_by(owner) && (start..=end).contains(&diary.created_at))
            .cloned()
            .collect();
        found.sort_by_key(|diary| (diary.created_at, diary.id));
        Ok(found)
    }

    async fn update(&self, diary: &Diary) -> Result<Option<Diary>, DiaryRepositoryError> {
        let mut store = self.lock()?;
        let Some(stored) = store.rows.get_mut(&diary.id.get()) else {
            return Ok(None);
        };
        stored.title = diary.title.clone();
        stored.content = diary.content.clone();
        Ok(Some(stored.clone()))
    }

    async fn delete(&self, id: DiaryId) -> Result<bool, DiaryRepositoryError> {
        Ok(self.lock()?.rows.remove(&id.get()).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DiaryContent, DiaryTitle, day_bounds};
    use chrono::NaiveDate;
    use rstest::{fixture, rstest};

    fn member(id: i64) -> MemberId {
        MemberId::new(id).expect("member id")
    }

    fn draft(owner: i64, day: u32, hour: u32) -> DiaryDraft {
        DiaryDraft {
            created_by: member(owner),
            title: DiaryTitle::new("title").expect("title"),
            content: DiaryContent::new("content").expect("content"),
            created_at: NaiveDate::from_ymd_opt(2024, 3, day)
                .and_then(|d| d.and_hms_opt(hour, 0, 0))
                .expect("timestamp"),
        }
    }

    #[fixture]
    fn repo() -> InMemoryDiaryRepository {
        InMemoryDiaryRepository::new()
    }

    #[rstest]
    #[tokio::test]
    async fn save_assigns_increasing_ids(repo: InMemoryDiaryRepository) {
        let first = repo.save(&draft(1, 1, 9)).await.expect("saved");
        let second = repo.save(&draft(1, 2, 9)).await.expect("saved");
        assert!(first.id < second.id);
    }

    #[rstest]
    #[tokio::test]
    async fn second_entry_for_same_member_and_day_is_rejected(repo: InMemoryDiaryRepository) {
        repo.save(&draft(1, 24, 8)).await.expect("saved");
        let err = repo.save(&draft(1, 24, 23)).await.expect_err("duplicate");
        assert!(matches!(err, DiaryRepositoryError::DuplicateDay { member_id: 1, .. }));

        repo.save(&draft(2, 24, 8)).await.expect("other member may write");
    }

    #[rstest]
    #[tokio::test]
    async fn exists_on_respects_owner_and_day(repo: InMemoryDiaryRepository) {
        repo.save(&draft(1, 24, 23)).await.expect("saved");
        let day = NaiveDate::from_ymd_opt(2024, 3, 24).expect("date");
        let (start, end) = day_bounds(day);

        assert!(repo.exists_on(member(1), start, end).await.expect("query"));
        assert!(!repo.exists_on(member(2), start, end).await.expect("query"));
        let (next_start, next_end) = day_bounds(day.succ_opt().expect("next"));
        assert!(!repo.exists_on(member(1), next_start, next_end).await.expect("query"));
    }

    #[rstest]
    #[tokio::test]
    async fn find_between_orders_by_creation(repo: InMemoryDiaryRepository) {
        repo.save(&draft(1, 10, 9)).await.expect("saved");
        repo.save(&draft(1, 3, 9)).await.expect("saved");
        repo.save(&draft(2, 5, 9)).await.expect("saved");
        let (start, _) = day_bounds(NaiveDate::from_ymd_opt(2024, 3, 1).expect("date"));
        let (_, end) = day_bounds(NaiveDate::from_ymd_opt(2024, 3, 31).expect("date"));

        let days: Vec<u32> = repo
            .find_between(member(1), start, end)
            .await
            .expect("query")
            .iter()
            .map(|d| chrono::Datelike::day(&d.day()))
            .collect();
        assert_eq!(days, vec![3, 10]);
    }

    #[rstest]
    #[tokio::test]
    async fn update_and_delete_report_missing_rows(repo: InMemoryDiaryRepository) {
        let saved = repo.save(&draft(1, 1, 9)).await.expect("saved");
        assert!(repo.delete(saved.id).await.expect("delete"));
        assert!(!repo.delete(saved.id).await.expect("delete"));
        assert_eq!(repo.update(&saved).await.expect("update"), None);
    }
}
