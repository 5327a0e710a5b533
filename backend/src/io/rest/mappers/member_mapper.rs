use crate::domain::commands::members::{CreateMemberCommand, UpdateMemberCommand};
use crate::domain::models::Member as DomainMember;
use shared::{CreateMemberRequest, Member as SharedMember, UpdateMemberRequest};

pub struct MemberMapper;

impl MemberMapper {
    pub fn to_dto(domain: DomainMember) -> SharedMember {
        SharedMember {
            birth_date: domain.format_birth_date(),
            id: domain.id,
            name: domain.name,
            allowance_value: domain.allowance_value,
            created_at: domain.created_at.to_rfc3339(),
            updated_at: domain.updated_at.to_rfc3339(),
        }
    }

    pub fn to_create_command(dto: CreateMemberRequest) -> CreateMemberCommand {
        CreateMemberCommand {
            name: dto.name,
            birth_date: dto.birth_date,
            allowance_value: dto.allowance_value,
        }
    }

    pub fn to_update_command(dto: UpdateMemberRequest) -> UpdateMemberCommand {
        UpdateMemberCommand {
            id: dto.id,
            name: dto.name,
            birth_date: dto.birth_date,
            allowance_value: dto.allowance_value,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};

    #[test]
    fn test_birth_date_uses_day_first_format() {
        let now = Utc::now();
        let member = DomainMember {
            id: "m1".into(),
            name: "Maria".into(),
            birth_date: NaiveDate::from_ymd_opt(2015, 6, 5).unwrap(),
            allowance_value: 50.0,
            created_at: now,
            updated_at: now,
        };
        assert_eq!(MemberMapper::to_dto(member).birth_date, "05/06/2015");
    }
}
