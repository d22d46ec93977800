// ==========================================
// 孤儿资助系统 - 候选记录校验器
// ==========================================
// 职责: 对构建出的 PendingOrphan 做基础领域校验
// 说明: 只报告违规，不修改记录，不阻断暂存决策之外的流程
// ==========================================

use crate::domain::orphan::PendingOrphan;
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

// ==========================================
// RecordViolation - 校验违规详情
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordViolation {
    /// 来源行号（对应台账的 ref）
    #[serde(rename = "ref")]
    pub reference: String,
    /// 违规字段
    pub field: String,
    /// 违规原因
    pub reason: String,
}

// ==========================================
// RecordValidator Trait
// ==========================================
// 实现者: PendingOrphanValidator
pub trait RecordValidator: Send + Sync {
    type Record;

    /// 校验单条记录；无违规返回空列表
    fn validate(&self, record: &Self::Record) -> Vec<RecordViolation>;
}

// ==========================================
// PendingOrphanValidator
// ==========================================
#[derive(Debug, Clone)]
pub struct PendingOrphanValidator {
    today: NaiveDate,
}

impl Default for PendingOrphanValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl PendingOrphanValidator {
    pub fn new() -> Self {
        Self::with_today(Local::now().date_naive())
    }

    /// 指定"今天"（测试用）
    pub fn with_today(today: NaiveDate) -> Self {
        Self { today }
    }

    fn check_future(
        &self,
        violations: &mut Vec<RecordViolation>,
        reference: &str,
        field: &str,
        date: Option<NaiveDate>,
    ) {
        if let Some(d) = date {
            if d > self.today {
                violations.push(RecordViolation {
                    reference: reference.to_string(),
                    field: field.to_string(),
                    reason: format!("{} {} is in the future", field, d),
                });
            }
        }
    }
}

impl RecordValidator for PendingOrphanValidator {
    type Record = PendingOrphan;

    fn validate(&self, orphan: &PendingOrphan) -> Vec<RecordViolation> {
        let reference = orphan.source_row.clone().unwrap_or_default();
        let mut violations = Vec::new();

        let required = [
            ("name", orphan.name.is_some()),
            ("father_name", orphan.father_name.is_some()),
            ("mother_name", orphan.mother_name.is_some()),
            ("date_of_birth", orphan.date_of_birth.is_some()),
            ("gender", orphan.gender.is_some()),
            ("original_address_province", orphan.original_address.province.is_some()),
            ("current_address_province", orphan.current_address.province.is_some()),
        ];
        for (field, present) in required {
            if !present {
                violations.push(RecordViolation {
                    reference: reference.clone(),
                    field: field.to_string(),
                    reason: format!("{} can't be blank", field),
                });
            }
        }

        self.check_future(&mut violations, &reference, "date_of_birth", orphan.date_of_birth);
        self.check_future(
            &mut violations,
            &reference,
            "father_date_of_death",
            orphan.father_date_of_death,
        );

        violations
    }
}
