// ==========================================
// 孤儿资助系统 - 待审核孤儿 Repository Trait
// ==========================================
// 职责: 定义候选记录暂存接口（不包含业务逻辑）
// 红线: Repository 不含业务规则，只做数据 CRUD
// ==========================================

use crate::domain::orphan::PendingOrphan;
use crate::repository::error::RepositoryResult;

// ==========================================
// PendingOrphanRepository Trait
// ==========================================
// 用途: 导入批次的候选记录暂存队列（等待人工审核）
// 实现者: PendingOrphanRepositoryImpl（使用 rusqlite）
pub trait PendingOrphanRepository: Send + Sync {
    /// 暂存一个批次的候选记录（事务化，保持传入顺序）
    ///
    /// # 返回
    /// - Ok(usize): 写入的记录数
    /// - Err: 数据库错误（整个事务回滚）
    fn stage(&self, batch_id: &str, orphans: &[PendingOrphan]) -> RepositoryResult<usize>;

    /// 按写入顺序读取批次中的候选记录
    fn list_batch(&self, batch_id: &str) -> RepositoryResult<Vec<PendingOrphan>>;

    /// 丢弃批次
    ///
    /// # 返回
    /// - Ok(usize): 删除的记录数（批次不存在为 0）
    fn discard_batch(&self, batch_id: &str) -> RepositoryResult<usize>;
}
