//! Typed form schemas for the add/edit modal
//!
//! Each editable entity declares its fields once; the modal renders them,
//! collects string values and hands them back through [`Editable::from_values`],
//! which validates before building the typed entity.

use chrono::Local;
use std::fmt;
use uuid::Uuid;

use crate::models::{
    MealPlan, MealPlanType, Member, MemberRole, ProgramLevel, Status, Supplement,
    TrainingProgram, SUPPLEMENT_CATEGORIES,
};
use crate::session::SessionRole;

/// Input kind of a form field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Number,
    Email,
    TextArea,
    Select(Vec<String>),
}

/// Declaration of one form field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: String,
    pub label: String,
    pub kind: FieldKind,
    pub required: bool,
    pub placeholder: String,
}

impl FieldSpec {
    pub fn new(name: &str, label: &str, kind: FieldKind) -> Self {
        Self {
            name: name.to_string(),
            label: label.to_string(),
            kind,
            required: false,
            placeholder: String::new(),
        }
    }

    pub fn text(name: &str, label: &str) -> Self {
        Self::new(name, label, FieldKind::Text)
    }

    pub fn number(name: &str, label: &str) -> Self {
        Self::new(name, label, FieldKind::Number)
    }

    pub fn email(name: &str, label: &str) -> Self {
        Self::new(name, label, FieldKind::Email)
    }

    pub fn textarea(name: &str, label: &str) -> Self {
        Self::new(name, label, FieldKind::TextArea)
    }

    pub fn select(name: &str, label: &str, options: Vec<String>) -> Self {
        Self::new(name, label, FieldKind::Select(options))
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn with_placeholder(mut self, placeholder: &str) -> Self {
        self.placeholder = placeholder.to_string();
        self
    }

    pub fn options(&self) -> &[String] {
        match &self.kind {
            FieldKind::Select(options) => options,
            _ => &[],
        }
    }

    /// Check a single raw value against this field
    pub fn check(&self, value: &str) -> Option<String> {
        let value = value.trim();
        if value.is_empty() {
            return self
                .required
                .then(|| format!("{} is required", self.label));
        }

        match &self.kind {
            FieldKind::Number => match value.parse::<f64>() {
                Ok(n) if n.is_finite() && n >= 0.0 => None,
                _ => Some(format!("{} must be a non-negative number", self.label)),
            },
            FieldKind::Email => match value.split_once('@') {
                Some((local, domain)) if !local.is_empty() && !domain.is_empty() => None,
                _ => Some(format!("{} must be a valid email address", self.label)),
            },
            FieldKind::Select(options) => {
                if options.iter().any(|option| option == value) {
                    None
                } else {
                    Some(format!("{} must be one of: {}", self.label, options.join(", ")))
                }
            }
            FieldKind::Text | FieldKind::TextArea => None,
        }
    }
}

/// Ordered field name to raw string value map
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormValues {
    entries: Vec<(String, String)>,
}

impl FormValues {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: &str, value: impl Into<String>) -> Self {
        self.set(name, value);
        self
    }

    pub fn set(&mut self, name: &str, value: impl Into<String>) {
        let value = value.into();
        match self.entries.iter_mut().find(|(key, _)| key == name) {
            Some((_, existing)) => *existing = value,
            None => self.entries.push((name.to_string(), value)),
        }
    }

    /// Raw value, or an empty string when the field was never set
    pub fn get(&self, name: &str) -> &str {
        self.entries
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
            .unwrap_or("")
    }

    /// Trimmed value, `None` when blank
    pub fn optional(&self, name: &str) -> Option<String> {
        let value = self.get(name).trim();
        (!value.is_empty()).then(|| value.to_string())
    }

    pub fn text(&self, name: &str) -> String {
        self.get(name).trim().to_string()
    }

    /// Numeric value; callers validate first so blanks read as zero
    pub fn number(&self, name: &str) -> f64 {
        self.get(name).trim().parse().unwrap_or(0.0)
    }

    pub fn integer(&self, name: &str) -> i64 {
        self.number(name).round() as i64
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }
}

/// Per-field validation failures
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: Vec<(String, String)>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.errors.push((field.to_string(), message.into()));
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// First error reported for a field
    pub fn get(&self, field: &str) -> Option<&str> {
        self.errors
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, message)| message.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.errors
            .iter()
            .map(|(field, message)| (field.as_str(), message.as_str()))
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<&str> = self.errors.iter().map(|(_, m)| m.as_str()).collect();
        f.write_str(&messages.join("; "))
    }
}

impl std::error::Error for ValidationErrors {}

/// Validate every field of a schema against the submitted values
pub fn validate(fields: &[FieldSpec], values: &FormValues) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();
    for field in fields {
        if let Some(message) = field.check(values.get(&field.name)) {
            errors.add(&field.name, message);
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Shortest password accepted when creating an account
pub const MIN_NEW_PASSWORD_LEN: usize = 8;

/// Sign-up form schema
pub fn registration_fields() -> Vec<FieldSpec> {
    vec![
        FieldSpec::text("fullName", "Full Name")
            .required()
            .with_placeholder("John Doe"),
        FieldSpec::email("email", "Email Address")
            .required()
            .with_placeholder("you@example.com"),
        FieldSpec::text("phone", "Phone Number")
            .required()
            .with_placeholder("555-123-4567"),
        FieldSpec::select(
            "role",
            "Account Type",
            vec![SessionRole::User.as_str().to_string(), SessionRole::Admin.as_str().to_string()],
        )
        .required(),
        FieldSpec::text("password", "Password")
            .required()
            .with_placeholder("At least 8 characters"),
        FieldSpec::text("confirmPassword", "Confirm Password")
            .required()
            .with_placeholder("Repeat password"),
        FieldSpec::select(
            "terms",
            "Agree to Terms and Privacy Policy",
            vec!["no".to_string(), "yes".to_string()],
        ),
    ]
}

/// A validated sign-up request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub role: SessionRole,
    pub password: String,
}

impl Registration {
    /// Check submitted sign-up values.
    ///
    /// Schema rules run first; the account rules below only report on fields
    /// that passed them, so each field shows one message.
    pub fn from_values(values: &FormValues) -> Result<Self, ValidationErrors> {
        let mut errors = match validate(&registration_fields(), values) {
            Ok(()) => ValidationErrors::new(),
            Err(errors) => errors,
        };
        let unchecked = |errors: &ValidationErrors, name: &str| errors.get(name).is_none();

        let full_name = values.text("fullName");
        if unchecked(&errors, "fullName") && full_name.chars().count() < 3 {
            errors.add("fullName", "Full name must be at least 3 characters");
        }

        let phone = values.text("phone");
        let digits: String = phone
            .chars()
            .filter(|c| !matches!(c, '-' | '(' | ')' | ' '))
            .collect();
        let phone_ok = (10..=15).contains(&digits.len()) && digits.chars().all(|c| c.is_ascii_digit());
        if unchecked(&errors, "phone") && !phone_ok {
            errors.add("phone", "Phone number must be 10-15 digits");
        }

        let password = values.get("password");
        if unchecked(&errors, "password") {
            if password.chars().count() < MIN_NEW_PASSWORD_LEN {
                errors.add(
                    "password",
                    format!("Password must be at least {} characters", MIN_NEW_PASSWORD_LEN),
                );
            } else if !(password.chars().any(char::is_uppercase)
                && password.chars().any(char::is_lowercase)
                && password.chars().any(|c| c.is_ascii_digit()))
            {
                errors.add("password", "Password must contain uppercase, lowercase, and number");
            }
        }

        if unchecked(&errors, "confirmPassword") && values.get("confirmPassword") != password {
            errors.add("confirmPassword", "Passwords do not match");
        }

        if values.get("terms") != "yes" {
            errors.add("terms", "You must agree to the terms and conditions");
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        let role = if values.get("role") == SessionRole::Admin.as_str() {
            SessionRole::Admin
        } else {
            SessionRole::User
        };
        Ok(Registration {
            full_name,
            email: values.text("email"),
            phone,
            role,
            password: password.to_string(),
        })
    }
}

/// Entities that can be created and edited through the add/edit modal
pub trait Editable: Sized {
    /// Singular display name, used in modal and dialog titles
    const ENTITY_NAME: &'static str;

    fn form_fields() -> Vec<FieldSpec>;

    fn to_values(&self) -> FormValues;

    /// Build an entity from submitted values.
    ///
    /// `base` is the record being edited; fields that are not part of the
    /// form (id, timestamps) are carried over from it, or generated for a
    /// new record.
    fn from_values(values: &FormValues, base: Option<&Self>) -> Result<Self, ValidationErrors>;

    fn add_title() -> String {
        format!("Add New {}", Self::ENTITY_NAME)
    }

    fn edit_title() -> String {
        format!("Edit {}", Self::ENTITY_NAME)
    }
}

fn new_id() -> String {
    Uuid::new_v4().to_string()
}

fn status_field() -> FieldSpec {
    FieldSpec::select("status", "Status", Status::options()).required()
}

fn parse_status(values: &FormValues) -> Status {
    Status::parse(values.get("status")).unwrap_or(Status::Active)
}

impl Editable for Supplement {
    const ENTITY_NAME: &'static str = "Supplement";

    fn form_fields() -> Vec<FieldSpec> {
        vec![
            FieldSpec::text("name", "Name")
                .required()
                .with_placeholder("Enter name"),
            FieldSpec::select(
                "category",
                "Category",
                SUPPLEMENT_CATEGORIES.iter().map(|c| c.to_string()).collect(),
            )
            .required(),
            FieldSpec::number("price", "Price")
                .required()
                .with_placeholder("0.00"),
            FieldSpec::number("stock", "Stock")
                .required()
                .with_placeholder("0"),
            FieldSpec::textarea("description", "Description")
                .with_placeholder("Enter description"),
            status_field(),
        ]
    }

    fn to_values(&self) -> FormValues {
        FormValues::new()
            .with("name", self.name.as_str())
            .with("category", self.category.as_str())
            .with("price", format!("{:.2}", self.price))
            .with("stock", self.stock.to_string())
            .with("description", self.description.clone().unwrap_or_default())
            .with("status", self.status.as_str())
    }

    fn from_values(values: &FormValues, base: Option<&Self>) -> Result<Self, ValidationErrors> {
        validate(&Self::form_fields(), values)?;
        Ok(Supplement {
            id: base.map(|b| b.id.clone()).unwrap_or_else(new_id),
            name: values.text("name"),
            category: values.text("category"),
            price: values.number("price"),
            stock: values.integer("stock"),
            description: values.optional("description"),
            status: parse_status(values),
            created_at: base
                .map(|b| b.created_at)
                .unwrap_or_else(|| Local::now().date_naive()),
        })
    }
}

impl Editable for MealPlan {
    const ENTITY_NAME: &'static str = "Meal Plan";

    fn form_fields() -> Vec<FieldSpec> {
        vec![
            FieldSpec::text("name", "Name")
                .required()
                .with_placeholder("Enter plan name"),
            FieldSpec::select("type", "Type", MealPlanType::options()).required(),
            FieldSpec::number("calories", "Daily Calories")
                .required()
                .with_placeholder("2000"),
            FieldSpec::number("duration", "Duration (days)")
                .required()
                .with_placeholder("30"),
            FieldSpec::number("price", "Price")
                .required()
                .with_placeholder("0.00"),
            status_field(),
        ]
    }

    fn to_values(&self) -> FormValues {
        FormValues::new()
            .with("name", self.name.as_str())
            .with("type", self.plan_type.as_str())
            .with("calories", self.calories.to_string())
            .with("duration", self.duration.to_string())
            .with("price", format!("{:.2}", self.price))
            .with("status", self.status.as_str())
    }

    fn from_values(values: &FormValues, base: Option<&Self>) -> Result<Self, ValidationErrors> {
        validate(&Self::form_fields(), values)?;
        Ok(MealPlan {
            id: base.map(|b| b.id.clone()).unwrap_or_else(new_id),
            name: values.text("name"),
            plan_type: MealPlanType::parse(values.get("type")).unwrap_or(MealPlanType::Maintenance),
            calories: values.integer("calories"),
            duration: values.integer("duration"),
            price: values.number("price"),
            status: parse_status(values),
        })
    }
}

impl Editable for TrainingProgram {
    const ENTITY_NAME: &'static str = "Training Program";

    fn form_fields() -> Vec<FieldSpec> {
        vec![
            FieldSpec::text("name", "Name")
                .required()
                .with_placeholder("Enter program name"),
            FieldSpec::select("level", "Level", ProgramLevel::options()).required(),
            FieldSpec::number("duration", "Duration (weeks)")
                .required()
                .with_placeholder("8"),
            FieldSpec::number("workoutsPerWeek", "Workouts per Week")
                .required()
                .with_placeholder("3"),
            FieldSpec::number("price", "Price")
                .required()
                .with_placeholder("0.00"),
            status_field(),
        ]
    }

    fn to_values(&self) -> FormValues {
        FormValues::new()
            .with("name", self.name.as_str())
            .with("level", self.level.as_str())
            .with("duration", self.duration.to_string())
            .with("workoutsPerWeek", self.workouts_per_week.to_string())
            .with("price", format!("{:.2}", self.price))
            .with("status", self.status.as_str())
    }

    fn from_values(values: &FormValues, base: Option<&Self>) -> Result<Self, ValidationErrors> {
        validate(&Self::form_fields(), values)?;
        Ok(TrainingProgram {
            id: base.map(|b| b.id.clone()).unwrap_or_else(new_id),
            name: values.text("name"),
            level: ProgramLevel::parse(values.get("level")).unwrap_or(ProgramLevel::Beginner),
            duration: values.integer("duration"),
            workouts_per_week: values.integer("workoutsPerWeek"),
            price: values.number("price"),
            status: parse_status(values),
        })
    }
}

impl Editable for Member {
    const ENTITY_NAME: &'static str = "User";

    fn form_fields() -> Vec<FieldSpec> {
        vec![
            FieldSpec::text("name", "Full Name")
                .required()
                .with_placeholder("Enter full name"),
            FieldSpec::email("email", "Email")
                .required()
                .with_placeholder("name@example.com"),
            FieldSpec::select("role", "Role", MemberRole::options()).required(),
            status_field(),
        ]
    }

    fn to_values(&self) -> FormValues {
        FormValues::new()
            .with("name", self.name.as_str())
            .with("email", self.email.as_str())
            .with("role", self.role.as_str())
            .with("status", self.status.as_str())
    }

    fn from_values(values: &FormValues, base: Option<&Self>) -> Result<Self, ValidationErrors> {
        validate(&Self::form_fields(), values)?;
        let today = Local::now().date_naive();
        Ok(Member {
            id: base.map(|b| b.id.clone()).unwrap_or_else(new_id),
            name: values.text("name"),
            email: values.text("email"),
            role: MemberRole::parse(values.get("role")).unwrap_or(MemberRole::Member),
            status: parse_status(values),
            joined_at: base.map(|b| b.joined_at).unwrap_or(today),
            last_active: base.map(|b| b.last_active).unwrap_or(today),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sample;

    #[test]
    fn test_required_fields_reject_blank() {
        let values = FormValues::new()
            .with("name", "   ")
            .with("category", "protein")
            .with("price", "10")
            .with("stock", "5")
            .with("status", "active");
        let errors = Supplement::from_values(&values, None).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get("name"), Some("Name is required"));
    }

    #[test]
    fn test_number_fields_must_parse() {
        let values = FormValues::new()
            .with("name", "Whey")
            .with("category", "protein")
            .with("price", "ten dollars")
            .with("stock", "-3")
            .with("status", "active");
        let errors = Supplement::from_values(&values, None).unwrap_err();
        assert!(errors.get("price").is_some());
        assert!(errors.get("stock").is_some());
        assert!(errors.get("name").is_none());
    }

    #[test]
    fn test_optional_blank_field_is_accepted() {
        let spec = FieldSpec::textarea("description", "Description");
        assert_eq!(spec.check(""), None);
        let spec = FieldSpec::number("price", "Price");
        assert_eq!(spec.check(""), None);
    }

    #[test]
    fn test_email_and_select_checks() {
        let email = FieldSpec::email("email", "Email").required();
        assert!(email.check("jane@example.com").is_none());
        assert!(email.check("jane@").is_some());
        assert!(email.check("@example.com").is_some());
        assert!(email.check("jane.example.com").is_some());

        let role = FieldSpec::select("role", "Role", MemberRole::options());
        assert!(role.check("trainer").is_none());
        assert!(role.check("owner").is_some());
    }

    #[test]
    fn test_edit_keeps_identity_and_timestamps() {
        let original = sample::supplements().remove(0);
        let values = original.to_values().with("price", "59.50");
        let updated = Supplement::from_values(&values, Some(&original)).unwrap();
        assert_eq!(updated.id, original.id);
        assert_eq!(updated.created_at, original.created_at);
        assert_eq!(updated.price, 59.5);
        assert_eq!(updated.name, original.name);
    }

    #[test]
    fn test_new_record_gets_fresh_id() {
        let values = FormValues::new()
            .with("name", "Hill Sprints")
            .with("level", "advanced")
            .with("duration", "6")
            .with("workoutsPerWeek", "4")
            .with("price", "79")
            .with("status", "inactive");
        let program = TrainingProgram::from_values(&values, None).unwrap();
        assert!(!program.id.is_empty());
        assert_eq!(program.level, ProgramLevel::Advanced);
        assert_eq!(program.status, Status::Inactive);
        assert_eq!(TrainingProgram::add_title(), "Add New Training Program");
        assert_eq!(TrainingProgram::edit_title(), "Edit Training Program");
    }

    #[test]
    fn test_form_values_set_overwrites() {
        let mut values = FormValues::new().with("name", "a");
        values.set("name", "b");
        assert_eq!(values.get("name"), "b");
        assert_eq!(values.iter().count(), 1);
        assert_eq!(values.get("missing"), "");
    }

    fn registration(password: &str, confirm: &str) -> FormValues {
        FormValues::new()
            .with("fullName", "Jordan Lee")
            .with("email", "jordan@example.com")
            .with("phone", "(555) 123-4567")
            .with("role", "admin")
            .with("password", password)
            .with("confirmPassword", confirm)
            .with("terms", "yes")
    }

    #[test]
    fn test_registration_accepts_valid_values() {
        let registration = Registration::from_values(&registration("Strong1pass", "Strong1pass")).unwrap();
        assert_eq!(registration.full_name, "Jordan Lee");
        assert_eq!(registration.role, SessionRole::Admin);
        assert_eq!(registration.phone, "(555) 123-4567");
    }

    #[test]
    fn test_registration_password_must_match() {
        let errors = Registration::from_values(&registration("Strong1pass", "Strong1pasz")).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get("confirmPassword"), Some("Passwords do not match"));

        let errors = Registration::from_values(&registration("Strong1pass", "")).unwrap_err();
        assert_eq!(errors.get("confirmPassword"), Some("Confirm Password is required"));
    }

    #[test]
    fn test_registration_password_strength() {
        let errors = Registration::from_values(&registration("Ab1", "Ab1")).unwrap_err();
        assert_eq!(errors.get("password"), Some("Password must be at least 8 characters"));

        let errors = Registration::from_values(&registration("alllower1", "alllower1")).unwrap_err();
        assert_eq!(
            errors.get("password"),
            Some("Password must contain uppercase, lowercase, and number")
        );
    }

    #[test]
    fn test_registration_name_phone_and_terms() {
        let values = registration("Strong1pass", "Strong1pass")
            .with("fullName", "Al")
            .with("phone", "555-12")
            .with("terms", "no");
        let errors = Registration::from_values(&values).unwrap_err();
        assert_eq!(errors.get("fullName"), Some("Full name must be at least 3 characters"));
        assert_eq!(errors.get("phone"), Some("Phone number must be 10-15 digits"));
        assert_eq!(errors.get("terms"), Some("You must agree to the terms and conditions"));

        let values = registration("Strong1pass", "Strong1pass").with("phone", "+1 555 123 4567");
        let errors = Registration::from_values(&values).unwrap_err();
        assert!(errors.get("phone").is_some());
    }
}
