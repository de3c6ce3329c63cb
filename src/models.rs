//! Domain entities shown in the dashboard tables

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// A single attribute value exposed by a row
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Integer(i64),
    Decimal(f64),
    Date(NaiveDate),
    List(Vec<String>),
}

impl FieldValue {
    fn as_number(&self) -> Option<f64> {
        match self {
            FieldValue::Integer(n) => Some(*n as f64),
            FieldValue::Decimal(n) => Some(*n),
            _ => None,
        }
    }

    /// Ordering used when a caller sorts rows by a column.
    ///
    /// Numbers compare numerically, dates chronologically and everything else
    /// by its case-insensitive display form.
    pub fn compare(&self, other: &FieldValue) -> Ordering {
        if let (Some(a), Some(b)) = (self.as_number(), other.as_number()) {
            return a.partial_cmp(&b).unwrap_or(Ordering::Equal);
        }
        match (self, other) {
            (FieldValue::Date(a), FieldValue::Date(b)) => a.cmp(b),
            _ => self
                .to_string()
                .to_lowercase()
                .cmp(&other.to_string().to_lowercase()),
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Text(s) => f.write_str(s),
            FieldValue::Integer(n) => write!(f, "{}", n),
            FieldValue::Decimal(n) => write!(f, "{}", n),
            FieldValue::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            FieldValue::List(items) => f.write_str(&items.join(", ")),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

/// Row abstraction consumed by the data table.
///
/// Rows are addressed by attribute name; the table never mutates them.
pub trait Record {
    /// Look up an attribute by key. Unknown keys return `None`.
    fn field(&self, key: &str) -> Option<FieldValue>;

    /// Keys matched by free-text search
    fn searchable_fields() -> &'static [&'static str]
    where
        Self: Sized;

    /// Stable identifier under the given row key, or an empty string
    fn row_id(&self, row_key: &str) -> String {
        self.field(row_key).map(|v| v.to_string()).unwrap_or_default()
    }
}

macro_rules! labeled_enum {
    ($name:ident { $($variant:ident => $label:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
        #[serde(rename_all = "kebab-case")]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $label),+
                }
            }

            pub fn parse(value: &str) -> Option<Self> {
                let value = value.trim().to_lowercase();
                Self::ALL.iter().copied().find(|v| v.as_str() == value)
            }

            pub fn options() -> Vec<String> {
                Self::ALL.iter().map(|v| v.as_str().to_string()).collect()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

labeled_enum!(Status {
    Active => "active",
    Inactive => "inactive",
});

labeled_enum!(MealPlanType {
    WeightLoss => "weight-loss",
    MuscleGain => "muscle-gain",
    Maintenance => "maintenance",
});

labeled_enum!(MealTier {
    Gold => "gold",
    Platinum => "platinum",
    Diamond => "diamond",
});

labeled_enum!(Difficulty {
    Easy => "easy",
    Medium => "medium",
    Hard => "hard",
});

labeled_enum!(MealCategory {
    Breakfast => "breakfast",
    Lunch => "lunch",
    Dinner => "dinner",
    Snack => "snack",
});

labeled_enum!(ProgramLevel {
    Beginner => "beginner",
    Intermediate => "intermediate",
    Advanced => "advanced",
});

labeled_enum!(MemberRole {
    Admin => "admin",
    Trainer => "trainer",
    Member => "member",
});

/// Supplement categories offered in the add/edit form
pub const SUPPLEMENT_CATEGORIES: &[&str] = &[
    "protein",
    "amino-acids",
    "pre-workout",
    "health",
    "performance",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Supplement {
    pub id: String,
    pub name: String,
    pub category: String,
    pub price: f64,
    pub stock: i64,
    pub description: Option<String>,
    pub status: Status,
    pub created_at: NaiveDate,
}

impl Record for Supplement {
    fn field(&self, key: &str) -> Option<FieldValue> {
        match key {
            "id" => Some(self.id.as_str().into()),
            "name" => Some(self.name.as_str().into()),
            "category" => Some(self.category.as_str().into()),
            "price" => Some(FieldValue::Decimal(self.price)),
            "stock" => Some(FieldValue::Integer(self.stock)),
            "description" => self.description.as_deref().map(FieldValue::from),
            "status" => Some(self.status.as_str().into()),
            "createdAt" => Some(FieldValue::Date(self.created_at)),
            _ => None,
        }
    }

    fn searchable_fields() -> &'static [&'static str] {
        &["name", "category", "description"]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealPlan {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub plan_type: MealPlanType,
    pub calories: i64,
    /// Length of the plan in days
    pub duration: i64,
    pub price: f64,
    pub status: Status,
}

impl Record for MealPlan {
    fn field(&self, key: &str) -> Option<FieldValue> {
        match key {
            "id" => Some(self.id.as_str().into()),
            "name" => Some(self.name.as_str().into()),
            "type" => Some(self.plan_type.as_str().into()),
            "calories" => Some(FieldValue::Integer(self.calories)),
            "duration" => Some(FieldValue::Integer(self.duration)),
            "price" => Some(FieldValue::Decimal(self.price)),
            "status" => Some(self.status.as_str().into()),
            _ => None,
        }
    }

    fn searchable_fields() -> &'static [&'static str] {
        &["name", "type"]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NutritionFacts {
    pub protein: i64,
    pub carbs: i64,
    pub fats: i64,
    pub fiber: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Meal {
    pub id: String,
    pub name: String,
    pub calories: i64,
    pub plan: MealTier,
    pub description: String,
    pub preparation_method: String,
    pub ingredients: Vec<String>,
    pub nutrition_facts: NutritionFacts,
    /// Minutes
    pub cooking_time: i64,
    pub servings: i64,
    pub difficulty: Difficulty,
    pub category: MealCategory,
    pub status: Status,
    pub created_at: NaiveDate,
}

impl Record for Meal {
    fn field(&self, key: &str) -> Option<FieldValue> {
        match key {
            "id" => Some(self.id.as_str().into()),
            "name" => Some(self.name.as_str().into()),
            "calories" => Some(FieldValue::Integer(self.calories)),
            "plan" => Some(self.plan.as_str().into()),
            "description" => Some(self.description.as_str().into()),
            "preparationMethod" => Some(self.preparation_method.as_str().into()),
            "ingredients" => Some(FieldValue::List(self.ingredients.clone())),
            "protein" => Some(FieldValue::Integer(self.nutrition_facts.protein)),
            "carbs" => Some(FieldValue::Integer(self.nutrition_facts.carbs)),
            "fats" => Some(FieldValue::Integer(self.nutrition_facts.fats)),
            "fiber" => Some(FieldValue::Integer(self.nutrition_facts.fiber)),
            "cookingTime" => Some(FieldValue::Integer(self.cooking_time)),
            "servings" => Some(FieldValue::Integer(self.servings)),
            "difficulty" => Some(self.difficulty.as_str().into()),
            "category" => Some(self.category.as_str().into()),
            "status" => Some(self.status.as_str().into()),
            "createdAt" => Some(FieldValue::Date(self.created_at)),
            _ => None,
        }
    }

    fn searchable_fields() -> &'static [&'static str] {
        &["name", "description", "category", "ingredients"]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrainingProgram {
    pub id: String,
    pub name: String,
    pub level: ProgramLevel,
    /// Length of the program in weeks
    pub duration: i64,
    pub workouts_per_week: i64,
    pub price: f64,
    pub status: Status,
}

impl Record for TrainingProgram {
    fn field(&self, key: &str) -> Option<FieldValue> {
        match key {
            "id" => Some(self.id.as_str().into()),
            "name" => Some(self.name.as_str().into()),
            "level" => Some(self.level.as_str().into()),
            "duration" => Some(FieldValue::Integer(self.duration)),
            "workoutsPerWeek" => Some(FieldValue::Integer(self.workouts_per_week)),
            "price" => Some(FieldValue::Decimal(self.price)),
            "status" => Some(self.status.as_str().into()),
            _ => None,
        }
    }

    fn searchable_fields() -> &'static [&'static str] {
        &["name", "level"]
    }
}

/// A platform account listed on the users page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: MemberRole,
    pub status: Status,
    pub joined_at: NaiveDate,
    pub last_active: NaiveDate,
}

impl Record for Member {
    fn field(&self, key: &str) -> Option<FieldValue> {
        match key {
            "id" => Some(self.id.as_str().into()),
            "name" => Some(self.name.as_str().into()),
            "email" => Some(self.email.as_str().into()),
            "role" => Some(self.role.as_str().into()),
            "status" => Some(self.status.as_str().into()),
            "joinedAt" => Some(FieldValue::Date(self.joined_at)),
            "lastActive" => Some(FieldValue::Date(self.last_active)),
            _ => None,
        }
    }

    fn searchable_fields() -> &'static [&'static str] {
        &["name", "email", "role"]
    }
}

/// Headline metric on the admin overview screen
#[derive(Debug, Clone, PartialEq)]
pub struct OverviewCard {
    pub id: String,
    pub title: String,
    pub value: u64,
    pub delta: String,
}

labeled_enum!(Gender {
    Male => "male",
    Female => "female",
});

/// Weight class derived from body-mass index
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BmiCategory {
    Underweight,
    Normal,
    Overweight,
    Obese,
}

impl BmiCategory {
    pub fn from_bmi(bmi: f64) -> Self {
        if bmi < 18.5 {
            BmiCategory::Underweight
        } else if bmi < 25.0 {
            BmiCategory::Normal
        } else if bmi < 30.0 {
            BmiCategory::Overweight
        } else {
            BmiCategory::Obese
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BmiCategory::Underweight => "Underweight",
            BmiCategory::Normal => "Normal",
            BmiCategory::Overweight => "Overweight",
            BmiCategory::Obese => "Obese",
        }
    }
}

/// Body measurements and contact details of the signed-in trainee
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TraineeProfile {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub height_cm: f64,
    pub weight_kg: f64,
    pub age: u32,
    pub gender: Gender,
    pub joined_at: NaiveDate,
}

impl TraineeProfile {
    fn height_m(&self) -> f64 {
        self.height_cm / 100.0
    }

    /// Body-mass index, 0 when no height is recorded
    pub fn bmi(&self) -> f64 {
        let height = self.height_m();
        if height <= 0.0 {
            return 0.0;
        }
        self.weight_kg / (height * height)
    }

    pub fn bmi_category(&self) -> BmiCategory {
        BmiCategory::from_bmi(self.bmi())
    }

    /// Weight range in kg for a BMI between 18.5 and 24.9
    pub fn ideal_weight_range(&self) -> (u32, u32) {
        let square = self.height_m() * self.height_m();
        ((18.5 * square).round() as u32, (24.9 * square).round() as u32)
    }

    /// Basal metabolic rate in kcal/day (revised Harris-Benedict)
    pub fn bmr(&self) -> u32 {
        let (w, h, a) = (self.weight_kg, self.height_cm, f64::from(self.age));
        let bmr = match self.gender {
            Gender::Male => 88.362 + 13.397 * w + 4.799 * h - 5.677 * a,
            Gender::Female => 447.593 + 9.247 * w + 3.098 * h - 4.33 * a,
        };
        bmr.round().max(0.0) as u32
    }
}

/// A session from the member workout library
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Workout {
    pub id: String,
    pub title: String,
    pub description: String,
    pub full_description: Option<String>,
    /// Minutes
    pub duration: u32,
    pub level: ProgramLevel,
    pub calories: u32,
    pub exercises: Vec<String>,
}

/// Where a subscription stands relative to its end date
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanStatus {
    Active,
    ExpiringSoon,
    Expired,
}

impl PlanStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlanStatus::Active => "Active",
            PlanStatus::ExpiringSoon => "Expiring Soon",
            PlanStatus::Expired => "Expired",
        }
    }
}

/// Days left at which a plan counts as expiring soon
pub const EXPIRING_SOON_DAYS: i64 = 7;

/// A member's paid subscription
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionPlan {
    pub tier: MealTier,
    pub duration_months: u32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub price: f64,
    pub features: Vec<String>,
}

impl SubscriptionPlan {
    /// "Gold Plan", "Platinum Plan", ...
    pub fn name(&self) -> String {
        let tier = self.tier.as_str();
        let mut chars = tier.chars();
        match chars.next() {
            Some(first) => format!("{}{} Plan", first.to_uppercase(), chars.as_str()),
            None => "Plan".to_string(),
        }
    }

    /// Billing counts every month as 30 days
    pub fn total_days(&self) -> i64 {
        i64::from(self.duration_months) * 30
    }

    pub fn remaining_days(&self, today: NaiveDate) -> i64 {
        (self.end_date - today).num_days().max(0)
    }

    /// Share of the plan already used, 0 to 100
    pub fn progress_percent(&self, today: NaiveDate) -> f64 {
        let total = self.total_days();
        if total <= 0 {
            return 100.0;
        }
        let used = (total - self.remaining_days(today)) as f64;
        (used / total as f64 * 100.0).clamp(0.0, 100.0)
    }

    pub fn status(&self, today: NaiveDate) -> PlanStatus {
        match self.remaining_days(today) {
            0 => PlanStatus::Expired,
            days if days <= EXPIRING_SOON_DAYS => PlanStatus::ExpiringSoon,
            _ => PlanStatus::Active,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_value_display() {
        assert_eq!(FieldValue::Decimal(49.99).to_string(), "49.99");
        assert_eq!(FieldValue::Decimal(50.0).to_string(), "50");
        assert_eq!(FieldValue::Integer(120).to_string(), "120");
        let date = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        assert_eq!(FieldValue::Date(date).to_string(), "2024-01-15");
        let list = FieldValue::List(vec!["a".to_string(), "b".to_string()]);
        assert_eq!(list.to_string(), "a, b");
    }

    #[test]
    fn test_field_value_compare() {
        // numeric, not lexicographic
        assert_eq!(
            FieldValue::Integer(9).compare(&FieldValue::Integer(120)),
            Ordering::Less
        );
        assert_eq!(
            FieldValue::Decimal(19.99).compare(&FieldValue::Integer(20)),
            Ordering::Less
        );
        assert_eq!(
            FieldValue::from("apple").compare(&FieldValue::from("Banana")),
            Ordering::Less
        );
    }

    #[test]
    fn test_labeled_enum_parse() {
        assert_eq!(Status::parse("Active"), Some(Status::Active));
        assert_eq!(MealPlanType::parse("muscle-gain"), Some(MealPlanType::MuscleGain));
        assert_eq!(ProgramLevel::parse("expert"), None);
        assert_eq!(MemberRole::options(), vec!["admin", "trainer", "member"]);
    }

    #[test]
    fn test_record_unknown_field() {
        let program = TrainingProgram {
            id: "1".to_string(),
            name: "Strength".to_string(),
            level: ProgramLevel::Beginner,
            duration: 8,
            workouts_per_week: 3,
            price: 49.99,
            status: Status::Active,
        };
        assert_eq!(program.field("nope"), None);
        assert_eq!(program.row_id("id"), "1");
        assert_eq!(program.row_id("missing"), "");
    }

    fn profile(gender: Gender, height_cm: f64, weight_kg: f64, age: u32) -> TraineeProfile {
        TraineeProfile {
            full_name: "Alex Carter".to_string(),
            email: "trainee@trainify.com".to_string(),
            phone: "555-010-2030".to_string(),
            height_cm,
            weight_kg,
            age,
            gender,
            joined_at: NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
        }
    }

    #[test]
    fn test_trainee_health_metrics() {
        let male = profile(Gender::Male, 178.0, 76.0, 29);
        assert_eq!(format!("{:.1}", male.bmi()), "24.0");
        assert_eq!(male.bmi_category(), BmiCategory::Normal);
        assert_eq!(male.ideal_weight_range(), (59, 79));
        assert_eq!(male.bmr(), 1796);

        let female = profile(Gender::Female, 165.0, 60.0, 30);
        assert_eq!(female.bmr(), 1384);

        assert_eq!(BmiCategory::from_bmi(18.4), BmiCategory::Underweight);
        assert_eq!(BmiCategory::from_bmi(25.0), BmiCategory::Overweight);
        assert_eq!(BmiCategory::from_bmi(30.0), BmiCategory::Obese);
        assert_eq!(profile(Gender::Male, 0.0, 70.0, 30).bmi(), 0.0);
    }

    #[test]
    fn test_subscription_progress_and_status() {
        let day = |m, d| NaiveDate::from_ymd_opt(2024, m, d).unwrap();
        let plan = SubscriptionPlan {
            tier: MealTier::Platinum,
            duration_months: 6,
            start_date: day(1, 1),
            end_date: day(6, 29),
            price: 299.99,
            features: vec!["Custom meal plans".to_string()],
        };
        assert_eq!(plan.name(), "Platinum Plan");
        assert_eq!(plan.total_days(), 180);

        assert_eq!(plan.remaining_days(day(3, 31)), 90);
        assert_eq!(plan.progress_percent(day(3, 31)), 50.0);
        assert_eq!(plan.status(day(3, 31)), PlanStatus::Active);

        assert_eq!(plan.status(day(6, 25)), PlanStatus::ExpiringSoon);

        assert_eq!(plan.remaining_days(day(7, 10)), 0);
        assert_eq!(plan.progress_percent(day(7, 10)), 100.0);
        assert_eq!(plan.status(day(7, 10)).as_str(), "Expired");
    }
}
