// ==========================================
// 孤儿资助系统 - 待审核孤儿领域模型
// ==========================================
// 用途: 导入层由 FieldMap 构建，交由领域校验与暂存
// 红线: 本结构不含业务校验逻辑
// ==========================================

use crate::domain::types::Gender;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ==========================================
// Address - 地址
// ==========================================
// province 为省份外键（选项规则解析后的编码）
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub province: Option<i64>,
    pub city: Option<String>,
    pub neighborhood: Option<String>,
    pub street: Option<String>,
    pub details: Option<String>,
}

// ==========================================
// PendingOrphan - 待审核孤儿记录
// ==========================================
// 未出现在 FieldMap 中的属性保持 None
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingOrphan {
    // ===== 基本信息 =====
    pub name: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub gender: Option<Gender>,
    pub orphan_status: Option<String>,
    pub health_status: Option<String>,
    pub schooling_status: Option<String>,
    pub goes_to_school: Option<bool>,

    // ===== 父亲信息 =====
    pub father_name: Option<String>,
    pub father_is_martyr: Option<bool>,
    pub father_occupation: Option<String>,
    pub father_place_of_death: Option<String>,
    pub father_cause_of_death: Option<String>,
    pub father_date_of_death: Option<NaiveDate>,

    // ===== 母亲信息 =====
    pub mother_name: Option<String>,
    pub mother_alive: Option<bool>,

    // ===== 监护人 =====
    pub guardian_name: Option<String>,
    pub guardian_relationship: Option<String>,
    pub guardian_id_num: Option<i64>,

    // ===== 地址 =====
    pub original_address: Address,
    pub current_address: Address,

    // ===== 联系方式 =====
    pub contact_number: Option<String>,
    pub alt_contact_number: Option<String>,

    // ===== 资助情况 =====
    pub sponsored_by_another_org: Option<bool>,
    pub another_org_sponsorship_details: Option<String>,
    pub minor_siblings_count: Option<i64>,
    pub sponsored_minor_siblings_count: Option<i64>,

    pub comments: Option<String>,

    // 元信息: 来源行号
    pub source_row: Option<String>,
}
