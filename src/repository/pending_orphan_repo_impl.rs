// ==========================================
// 孤儿资助系统 - 待审核孤儿 Repository 实现
// ==========================================
// 职责: pending_orphan 暂存表读写（使用 rusqlite）
// 存储: 每条候选记录以 JSON 载荷保存，seq 保持批次内顺序
// ==========================================

use crate::db::{ensure_pending_orphan_schema, open_sqlite_connection};
use crate::domain::orphan::PendingOrphan;
use crate::repository::error::{RepositoryError, RepositoryResult};
use crate::repository::pending_orphan_repo::PendingOrphanRepository;
use chrono::Utc;
use rusqlite::{params, Connection};
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::info;

pub struct PendingOrphanRepositoryImpl {
    conn: Arc<Mutex<Connection>>,
}

impl PendingOrphanRepositoryImpl {
    /// 打开数据库并确保暂存表存在
    ///
    /// # 参数
    /// - db_path: 数据库文件路径
    pub fn new(db_path: &str) -> RepositoryResult<Self> {
        let conn = open_sqlite_connection(db_path)?;
        Self::from_connection(Arc::new(Mutex::new(conn)))
    }

    /// 复用已有连接（与 ConfigManager 共享同一数据库）
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> RepositoryResult<Self> {
        {
            let guard = conn
                .lock()
                .map_err(|e| RepositoryError::LockError(e.to_string()))?;
            ensure_pending_orphan_schema(&guard)?;
        }
        Ok(Self { conn })
    }

    fn get_conn(&self) -> RepositoryResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }
}

impl PendingOrphanRepository for PendingOrphanRepositoryImpl {
    fn stage(&self, batch_id: &str, orphans: &[PendingOrphan]) -> RepositoryResult<usize> {
        let mut conn = self.get_conn()?;
        let tx = conn.transaction()?;
        let created_at = Utc::now().format("%Y-%m-%d %H:%M:%S").to_string();

        let mut count = 0;
        {
            let mut stmt = tx.prepare(
                r#"
                INSERT INTO pending_orphan (batch_id, seq, source_row, payload_json, created_at)
                VALUES (?1, ?2, ?3, ?4, ?5)
                "#,
            )?;

            for (seq, orphan) in orphans.iter().enumerate() {
                let payload = serde_json::to_string(orphan)?;
                stmt.execute(params![
                    batch_id,
                    seq as i64,
                    orphan.source_row,
                    payload,
                    created_at,
                ])?;
                count += 1;
            }
        }

        tx.commit()?;
        info!(batch_id = %batch_id, count = count, "候选记录已暂存");
        Ok(count)
    }

    fn list_batch(&self, batch_id: &str) -> RepositoryResult<Vec<PendingOrphan>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            "SELECT payload_json FROM pending_orphan WHERE batch_id = ?1 ORDER BY seq ASC",
        )?;

        let payloads = stmt
            .query_map(params![batch_id], |row| row.get::<_, String>(0))?
            .collect::<Result<Vec<_>, _>>()?;

        payloads
            .iter()
            .map(|p| serde_json::from_str(p).map_err(RepositoryError::from))
            .collect()
    }

    fn discard_batch(&self, batch_id: &str) -> RepositoryResult<usize> {
        let conn = self.get_conn()?;
        let rows = conn.execute(
            "DELETE FROM pending_orphan WHERE batch_id = ?1",
            params![batch_id],
        )?;
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::Gender;
    use chrono::NaiveDate;

    fn setup_repo() -> PendingOrphanRepositoryImpl {
        let conn = Connection::open_in_memory().unwrap();
        crate::db::configure_sqlite_connection(&conn).unwrap();
        PendingOrphanRepositoryImpl::from_connection(Arc::new(Mutex::new(conn))).unwrap()
    }

    fn make_orphan(name: &str, row: &str) -> PendingOrphan {
        PendingOrphan {
            name: Some(name.to_string()),
            date_of_birth: NaiveDate::from_ymd_opt(2012, 5, 1),
            gender: Some(Gender::Female),
            source_row: Some(row.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_stage_and_list_batch_in_order() {
        let repo = setup_repo();
        let orphans = vec![make_orphan("Sara", "2"), make_orphan("Lina", "3")];

        assert_eq!(repo.stage("batch-1", &orphans).unwrap(), 2);

        let listed = repo.list_batch("batch-1").unwrap();
        assert_eq!(listed, orphans);
        assert!(repo.list_batch("batch-2").unwrap().is_empty());
    }

    #[test]
    fn test_discard_batch() {
        let repo = setup_repo();
        repo.stage("batch-1", &[make_orphan("Sara", "2")]).unwrap();
        repo.stage("batch-2", &[make_orphan("Lina", "2")]).unwrap();

        assert_eq!(repo.discard_batch("batch-1").unwrap(), 1);
        assert_eq!(repo.discard_batch("batch-1").unwrap(), 0);
        assert_eq!(repo.list_batch("batch-2").unwrap().len(), 1);
    }

    #[test]
    fn test_restaging_same_batch_violates_unique() {
        let repo = setup_repo();
        repo.stage("batch-1", &[make_orphan("Sara", "2")]).unwrap();

        let err = repo.stage("batch-1", &[make_orphan("Sara", "2")]).unwrap_err();
        assert!(matches!(err, RepositoryError::UniqueConstraintViolation(_)));
    }
}
