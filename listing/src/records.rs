//! Search, sort and status definitions for the EnvSync record types.

use crate::filter::{Categorized, Searchable, SortValue, Sortable};
use client::types::{AppStatus, Application, AuditLog, EnvironmentVariable};
use std::str::FromStr;

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
#[error("unknown {kind}: {value}")]
pub struct UnknownVariant {
    kind: &'static str,
    value: String,
}

impl UnknownVariant {
    fn new(kind: &'static str, value: &str) -> Self {
        UnknownVariant {
            kind,
            value: value.to_string(),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AppSortKey {
    #[default]
    Name,
    Created,
    Updated,
}

impl FromStr for AppSortKey {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "name" => Ok(AppSortKey::Name),
            "created" => Ok(AppSortKey::Created),
            "updated" => Ok(AppSortKey::Updated),
            _ => Err(UnknownVariant::new("sort key", s)),
        }
    }
}

impl Searchable for Application {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.name.as_str()];
        if let Some(description) = &self.description {
            fields.push(description);
        }
        fields
    }
}

impl Sortable for Application {
    type Key = AppSortKey;

    fn sort_value(&self, key: AppSortKey) -> SortValue<'_> {
        match key {
            AppSortKey::Name => SortValue::Text(&self.name),
            AppSortKey::Created => SortValue::Time(self.created_at),
            AppSortKey::Updated => SortValue::Time(self.updated_at),
        }
    }
}

impl Categorized for Application {
    type Category = AppStatus;

    fn category(&self) -> AppStatus {
        self.status
    }
}

pub fn parse_app_status(s: &str) -> Result<Option<AppStatus>, UnknownVariant> {
    match s {
        "all" => Ok(None),
        "active" => Ok(Some(AppStatus::Active)),
        "archived" => Ok(Some(AppStatus::Archived)),
        _ => Err(UnknownVariant::new("status", s)),
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum VariableSortKey {
    #[default]
    Key,
    Created,
    Updated,
}

impl FromStr for VariableSortKey {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "key" => Ok(VariableSortKey::Key),
            "created" => Ok(VariableSortKey::Created),
            "updated" => Ok(VariableSortKey::Updated),
            _ => Err(UnknownVariant::new("sort key", s)),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VariableKind {
    Sensitive,
    Plain,
}

pub fn parse_variable_kind(s: &str) -> Result<Option<VariableKind>, UnknownVariant> {
    match s {
        "all" => Ok(None),
        "sensitive" => Ok(Some(VariableKind::Sensitive)),
        "plain" => Ok(Some(VariableKind::Plain)),
        _ => Err(UnknownVariant::new("kind", s)),
    }
}

/// Sensitive values are never searched, so a search cannot reveal them.
impl Searchable for EnvironmentVariable {
    fn search_fields(&self) -> Vec<&str> {
        if self.sensitive {
            vec![self.key.as_str()]
        } else {
            vec![self.key.as_str(), self.value.as_str()]
        }
    }
}

impl Sortable for EnvironmentVariable {
    type Key = VariableSortKey;

    fn sort_value(&self, key: VariableSortKey) -> SortValue<'_> {
        match key {
            VariableSortKey::Key => SortValue::Text(&self.key),
            VariableSortKey::Created => SortValue::Time(self.created_at),
            VariableSortKey::Updated => SortValue::Time(self.updated_at),
        }
    }
}

impl Categorized for EnvironmentVariable {
    type Category = VariableKind;

    fn category(&self) -> VariableKind {
        if self.sensitive {
            VariableKind::Sensitive
        } else {
            VariableKind::Plain
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AuditSortKey {
    #[default]
    Created,
    EventType,
}

impl FromStr for AuditSortKey {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "created" => Ok(AuditSortKey::Created),
            "event_type" => Ok(AuditSortKey::EventType),
            _ => Err(UnknownVariant::new("sort key", s)),
        }
    }
}

impl Searchable for AuditLog {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.message.as_str(), self.event_type.as_str()];
        if let Some(user_id) = &self.user_id {
            fields.push(user_id);
        }
        fields
    }
}

impl Sortable for AuditLog {
    type Key = AuditSortKey;

    fn sort_value(&self, key: AuditSortKey) -> SortValue<'_> {
        match key {
            AuditSortKey::Created => SortValue::Time(self.created_at),
            AuditSortKey::EventType => SortValue::Text(&self.event_type),
        }
    }
}

impl Categorized for AuditLog {
    type Category = String;

    fn category(&self) -> String {
        self.event_type.clone()
    }
}
