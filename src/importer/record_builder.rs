// ==========================================
// 孤儿资助系统 - 候选记录构建器
// ==========================================
// 职责: FieldMap → PendingOrphan（按字段名逐个落位）
// 说明: 不做跨字段校验；未知字段忽略并记录调试日志
// ==========================================

use crate::domain::import::FieldMap;
use crate::domain::orphan::{Address, PendingOrphan};
use crate::domain::types::{FieldValue, Gender};
use crate::importer::importer_trait::RecordBuilder;
use tracing::debug;

#[derive(Debug, Clone, Copy, Default)]
pub struct OrphanRecordBuilder;

impl OrphanRecordBuilder {
    pub fn new() -> Self {
        Self
    }

    /// 构建单条待审核孤儿记录
    pub fn to_orphan(&self, fields: &FieldMap) -> PendingOrphan {
        let mut orphan = PendingOrphan {
            source_row: Some(fields.row_ref().to_string()),
            ..Default::default()
        };

        for (field, value) in fields {
            if !assign(&mut orphan, field, value) {
                debug!(row = fields.row_ref(), field = %field, "未知字段，已忽略");
            }
        }

        orphan
    }
}

impl RecordBuilder for OrphanRecordBuilder {
    type Record = PendingOrphan;

    fn to_record(&self, fields: FieldMap) -> PendingOrphan {
        self.to_orphan(&fields)
    }
}

/// 把一个字段写入记录；字段名未知返回 false
fn assign(orphan: &mut PendingOrphan, field: &str, value: &FieldValue) -> bool {
    if let Some(part) = field.strip_prefix("original_address_") {
        return assign_address(&mut orphan.original_address, part, value);
    }
    if let Some(part) = field.strip_prefix("current_address_") {
        return assign_address(&mut orphan.current_address, part, value);
    }

    match field {
        "name" => orphan.name = value.as_text(),
        "date_of_birth" => orphan.date_of_birth = value.as_date(),
        "gender" => orphan.gender = value.as_text().as_deref().and_then(Gender::from_str),
        "orphan_status" => orphan.orphan_status = value.as_text(),
        "health_status" => orphan.health_status = value.as_text(),
        "schooling_status" => orphan.schooling_status = value.as_text(),
        "goes_to_school" => orphan.goes_to_school = value.as_bool(),

        "father_name" => orphan.father_name = value.as_text(),
        "father_is_martyr" => orphan.father_is_martyr = value.as_bool(),
        "father_occupation" => orphan.father_occupation = value.as_text(),
        "father_place_of_death" => orphan.father_place_of_death = value.as_text(),
        "father_cause_of_death" => orphan.father_cause_of_death = value.as_text(),
        "father_date_of_death" => orphan.father_date_of_death = value.as_date(),

        "mother_name" => orphan.mother_name = value.as_text(),
        "mother_alive" => orphan.mother_alive = value.as_bool(),

        "guardian_name" => orphan.guardian_name = value.as_text(),
        "guardian_relationship" => orphan.guardian_relationship = value.as_text(),
        "guardian_id_num" => orphan.guardian_id_num = value.as_integer(),

        "contact_number" => orphan.contact_number = value.as_text(),
        "alt_contact_number" => orphan.alt_contact_number = value.as_text(),

        "sponsored_by_another_org" => orphan.sponsored_by_another_org = value.as_bool(),
        "another_org_sponsorship_details" => {
            orphan.another_org_sponsorship_details = value.as_text()
        }
        "minor_siblings_count" => orphan.minor_siblings_count = value.as_integer(),
        "sponsored_minor_siblings_count" => {
            orphan.sponsored_minor_siblings_count = value.as_integer()
        }

        "comments" => orphan.comments = value.as_text(),
        _ => return false,
    }
    true
}

fn assign_address(address: &mut Address, part: &str, value: &FieldValue) -> bool {
    match part {
        "province" => address.province = value.as_integer(),
        "city" => address.city = value.as_text(),
        "neighborhood" => address.neighborhood = value.as_text(),
        "street" => address.street = value.as_text(),
        "details" => address.details = value.as_text(),
        _ => return false,
    }
    true
}
