use chrono::{Local, NaiveDate, Utc};
use std::sync::Arc;
use tracing::{info, warn};

use crate::domain::commands::members::{CreateMemberCommand, UpdateMemberCommand};
use crate::domain::error::{DomainError, DomainResult};
use crate::domain::models::{round_cents, Member, MemberValidationError, Page, Paged};
use crate::storage::MemberStorage;

/// Service for the family members receiving an allowance
#[derive(Clone)]
pub struct MemberService {
    members: Arc<dyn MemberStorage>,
}

impl MemberService {
    pub fn new(members: Arc<dyn MemberStorage>) -> Self {
        Self { members }
    }

    pub async fn create(&self, command: CreateMemberCommand) -> DomainResult<Member> {
        info!("Creating member: name={}, birth_date={}", command.name, command.birth_date);

        let (name, birth_date, allowance_value) =
            validate(&command.name, &command.birth_date, command.allowance_value, today())?;
        if self.members.find_member_by_name(&name).await?.is_some() {
            return Err(MemberValidationError::DuplicateName.into());
        }

        let now = Utc::now();
        let member = Member {
            id: uuid::Uuid::new_v4().to_string(),
            name,
            birth_date,
            allowance_value,
            created_at: now,
            updated_at: now,
        };
        let saved = self.members.save_member(&member).await?;
        info!("Created member {} with ID {}", saved.name, saved.id);
        Ok(saved)
    }

    pub async fn update(&self, command: UpdateMemberCommand) -> DomainResult<Member> {
        info!("Updating member {}", command.id);

        let mut member = self
            .members
            .get_member(&command.id)
            .await?
            .ok_or_else(|| DomainError::not_found("Member", &command.id))?;

        let (name, birth_date, allowance_value) =
            validate(&command.name, &command.birth_date, command.allowance_value, today())?;
        if let Some(existing) = self.members.find_member_by_name(&name).await? {
            if existing.id != member.id {
                return Err(MemberValidationError::DuplicateName.into());
            }
        }

        if member.name != name {
            // Lists reference members by name and keep the old one
            warn!("Renaming member {} from {} to {}", member.id, member.name, name);
        }
        member.name = name;
        member.birth_date = birth_date;
        member.allowance_value = allowance_value;
        member.updated_at = Utc::now();
        Ok(self.members.save_member(&member).await?)
    }

    pub async fn delete(&self, member_id: &str) -> DomainResult<()> {
        info!("Deleting member {}", member_id);
        if !self.members.delete_member(member_id).await? {
            return Err(DomainError::not_found("Member", member_id));
        }
        Ok(())
    }

    pub async fn get(&self, member_id: &str) -> DomainResult<Option<Member>> {
        Ok(self.members.get_member(member_id).await?)
    }

    pub async fn find_by_name(&self, name: &str) -> DomainResult<Option<Member>> {
        Ok(self.members.find_member_by_name(name.trim()).await?)
    }

    pub async fn list(&self, page: Page) -> DomainResult<Paged<Member>> {
        Ok(self.members.list_members(page).await?)
    }
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

fn validate(
    name: &str,
    birth_date: &str,
    allowance_value: f64,
    today: NaiveDate,
) -> Result<(String, NaiveDate, f64), MemberValidationError> {
    Member::validate_name(name)?;
    let birth_date = Member::parse_birth_date(birth_date, today)?;
    Member::validate_allowance(allowance_value)?;
    Ok((name.trim().to_string(), birth_date, round_cents(allowance_value)))
}
