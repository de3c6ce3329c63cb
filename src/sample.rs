//! In-memory mock data and display helpers

use chrono::{Duration, NaiveDate};

use crate::models::{
    Difficulty, Gender, Meal, MealCategory, MealPlan, MealPlanType, MealTier, Member, MemberRole,
    NutritionFacts, OverviewCard, ProgramLevel, Status, SubscriptionPlan, Supplement,
    TraineeProfile, TrainingProgram, Workout,
};

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap_or_default()
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Format a price as US dollars, e.g. `$49.99`
pub fn format_price(price: f64) -> String {
    format!("${:.2}", price)
}

/// Format a date the way the dashboard shows it, e.g. `Jan 15, 2024`
pub fn format_date(date: NaiveDate) -> String {
    date.format("%b %-d, %Y").to_string()
}

pub fn overview() -> Vec<OverviewCard> {
    [
        ("users", "Total Users", 1234, "+12.5%"),
        ("supplements", "Supplements", 86, "+5.2%"),
        ("meals", "Meal Plans", 42, "+8.1%"),
        ("training", "Training Programs", 28, "+3.7%"),
    ]
    .into_iter()
    .map(|(id, title, value, delta)| OverviewCard {
        id: id.to_string(),
        title: title.to_string(),
        value,
        delta: delta.to_string(),
    })
    .collect()
}

pub fn supplements() -> Vec<Supplement> {
    let rows = [
        ("1", "Whey Protein Pro", "protein", 49.99, 120, "High-quality whey protein concentrate for muscle building", Status::Active, "2024-01-15"),
        ("2", "BCAA Energy", "amino-acids", 29.99, 85, "Branched-chain amino acids with natural caffeine for energy", Status::Active, "2024-01-20"),
        ("3", "Pre-Workout Max", "pre-workout", 39.99, 60, "Maximum energy pre-workout formula with creatine", Status::Active, "2024-02-01"),
        ("4", "Omega-3 Fish Oil", "health", 24.99, 150, "Pure omega-3 fatty acids for heart and brain health", Status::Active, "2024-02-10"),
        ("5", "Creatine Monohydrate", "performance", 19.99, 200, "Pure creatine monohydrate for strength and power", Status::Active, "2024-02-15"),
        ("6", "Casein Protein", "protein", 54.99, 45, "Slow-digesting protein for overnight muscle recovery", Status::Inactive, "2024-01-30"),
    ];

    rows.into_iter()
        .map(|(id, name, category, price, stock, description, status, created)| Supplement {
            id: id.to_string(),
            name: name.to_string(),
            category: category.to_string(),
            price,
            stock,
            description: Some(description.to_string()),
            status,
            created_at: date(created),
        })
        .collect()
}

pub fn meal_plans() -> Vec<MealPlan> {
    let rows = [
        ("1", "Fat Loss Accelerator", MealPlanType::WeightLoss, 1500, 30, 79.99, Status::Active),
        ("2", "Muscle Builder Pro", MealPlanType::MuscleGain, 2800, 60, 129.99, Status::Active),
        ("3", "Balanced Lifestyle", MealPlanType::Maintenance, 2200, 90, 99.99, Status::Active),
        ("4", "Quick Start Weight Loss", MealPlanType::WeightLoss, 1200, 14, 39.99, Status::Inactive),
    ];

    rows.into_iter()
        .map(|(id, name, plan_type, calories, duration, price, status)| MealPlan {
            id: id.to_string(),
            name: name.to_string(),
            plan_type,
            calories,
            duration,
            price,
            status,
        })
        .collect()
}

pub fn meals() -> Vec<Meal> {
    vec![
        Meal {
            id: "1".to_string(),
            name: "Grilled Chicken & Quinoa Bowl".to_string(),
            calories: 450,
            plan: MealTier::Gold,
            description: "A protein-packed meal with grilled chicken breast, quinoa, and fresh vegetables".to_string(),
            preparation_method: "1. Season chicken breast with salt, pepper, and herbs\n2. Grill chicken for 6-8 minutes each side\n3. Cook quinoa according to package instructions\n4. Steam broccoli and carrots\n5. Combine all ingredients in a bowl\n6. Drizzle with olive oil and lemon juice".to_string(),
            ingredients: strings(&["200g chicken breast", "1 cup quinoa", "1 cup broccoli", "1/2 cup carrots", "2 tbsp olive oil", "1 lemon", "Salt and pepper to taste"]),
            nutrition_facts: NutritionFacts { protein: 35, carbs: 40, fats: 12, fiber: 8 },
            cooking_time: 25,
            servings: 1,
            difficulty: Difficulty::Easy,
            category: MealCategory::Lunch,
            status: Status::Active,
            created_at: date("2024-01-15"),
        },
        Meal {
            id: "2".to_string(),
            name: "Salmon & Sweet Potato".to_string(),
            calories: 520,
            plan: MealTier::Platinum,
            description: "Wild-caught salmon with roasted sweet potato and asparagus".to_string(),
            preparation_method: "1. Preheat oven to 400°F (200°C)\n2. Season salmon with herbs and lemon\n3. Cut sweet potato into cubes\n4. Roast sweet potato for 20 minutes\n5. Add salmon and asparagus to the pan\n6. Bake for another 12-15 minutes".to_string(),
            ingredients: strings(&["180g wild salmon fillet", "1 medium sweet potato", "200g asparagus", "2 tbsp avocado oil", "Fresh dill", "Lemon wedges"]),
            nutrition_facts: NutritionFacts { protein: 32, carbs: 35, fats: 18, fiber: 6 },
            cooking_time: 35,
            servings: 1,
            difficulty: Difficulty::Medium,
            category: MealCategory::Dinner,
            status: Status::Active,
            created_at: date("2024-01-18"),
        },
        Meal {
            id: "3".to_string(),
            name: "Wagyu Steak & Truffle Risotto".to_string(),
            calories: 680,
            plan: MealTier::Diamond,
            description: "Premium wagyu beef with creamy truffle risotto".to_string(),
            preparation_method: "1. Bring steak to room temperature\n2. Sear steak 3 minutes per side\n3. Toast arborio rice in butter\n4. Add stock gradually while stirring\n5. Finish risotto with truffle oil and parmesan\n6. Rest steak and slice".to_string(),
            ingredients: strings(&["200g wagyu steak", "1 cup arborio rice", "2 cups beef stock", "1 tbsp truffle oil", "30g parmesan", "Butter"]),
            nutrition_facts: NutritionFacts { protein: 45, carbs: 42, fats: 28, fiber: 3 },
            cooking_time: 45,
            servings: 1,
            difficulty: Difficulty::Hard,
            category: MealCategory::Dinner,
            status: Status::Active,
            created_at: date("2024-01-20"),
        },
        Meal {
            id: "4".to_string(),
            name: "Greek Yogurt Parfait".to_string(),
            calories: 280,
            plan: MealTier::Gold,
            description: "Layered Greek yogurt with berries and granola".to_string(),
            preparation_method: "1. Add a layer of yogurt to a glass\n2. Add mixed berries\n3. Sprinkle granola\n4. Repeat layers\n5. Drizzle with honey".to_string(),
            ingredients: strings(&["200g Greek yogurt", "1/2 cup mixed berries", "1/4 cup granola", "1 tsp honey"]),
            nutrition_facts: NutritionFacts { protein: 20, carbs: 32, fats: 8, fiber: 5 },
            cooking_time: 5,
            servings: 1,
            difficulty: Difficulty::Easy,
            category: MealCategory::Breakfast,
            status: Status::Active,
            created_at: date("2024-01-22"),
        },
        Meal {
            id: "5".to_string(),
            name: "Tuna Poke Bowl".to_string(),
            calories: 420,
            plan: MealTier::Platinum,
            description: "Fresh ahi tuna over sushi rice with edamame and avocado".to_string(),
            preparation_method: "1. Cook sushi rice and season with rice vinegar\n2. Cube tuna and marinate in soy sauce and sesame oil\n3. Slice avocado and cucumber\n4. Assemble bowl with rice as base\n5. Top with tuna, vegetables and sesame seeds".to_string(),
            ingredients: strings(&["150g sushi-grade tuna", "1 cup sushi rice", "1/2 avocado", "1/4 cup edamame", "Soy sauce", "Sesame seeds"]),
            nutrition_facts: NutritionFacts { protein: 28, carbs: 38, fats: 14, fiber: 4 },
            cooking_time: 20,
            servings: 1,
            difficulty: Difficulty::Medium,
            category: MealCategory::Lunch,
            status: Status::Active,
            created_at: date("2024-01-25"),
        },
        Meal {
            id: "6".to_string(),
            name: "Lobster Thermidor".to_string(),
            calories: 580,
            plan: MealTier::Diamond,
            description: "Classic French lobster in a rich cream and cognac sauce".to_string(),
            preparation_method: "1. Boil lobster for 8 minutes\n2. Remove meat and chop\n3. Make sauce with butter, shallots, cognac and cream\n4. Fold lobster into sauce\n5. Fill shells, top with gruyere and grill until golden".to_string(),
            ingredients: strings(&["1 whole lobster", "2 tbsp butter", "1 shallot", "2 tbsp cognac", "1/2 cup cream", "30g gruyere"]),
            nutrition_facts: NutritionFacts { protein: 38, carbs: 8, fats: 22, fiber: 1 },
            cooking_time: 40,
            servings: 1,
            difficulty: Difficulty::Hard,
            category: MealCategory::Dinner,
            status: Status::Active,
            created_at: date("2024-01-28"),
        },
    ]
}

pub fn training_programs() -> Vec<TrainingProgram> {
    let rows = [
        ("1", "Beginner Strength Foundation", ProgramLevel::Beginner, 8, 3, 49.99, Status::Active),
        ("2", "Intermediate Power Building", ProgramLevel::Intermediate, 12, 4, 79.99, Status::Active),
        ("3", "Advanced Competition Prep", ProgramLevel::Advanced, 16, 6, 149.99, Status::Active),
        ("4", "Home Workout Essentials", ProgramLevel::Beginner, 6, 4, 29.99, Status::Inactive),
    ];

    rows.into_iter()
        .map(|(id, name, level, duration, workouts_per_week, price, status)| TrainingProgram {
            id: id.to_string(),
            name: name.to_string(),
            level,
            duration,
            workouts_per_week,
            price,
            status,
        })
        .collect()
}

pub fn members() -> Vec<Member> {
    let rows = [
        ("1", "Sarah Johnson", "sarah.johnson@example.com", MemberRole::Member, Status::Active, "2024-01-15", "2024-03-10"),
        ("2", "Mike Chen", "mike.chen@example.com", MemberRole::Trainer, Status::Active, "2023-11-20", "2024-03-09"),
        ("3", "Emily Rodriguez", "emily.rodriguez@example.com", MemberRole::Member, Status::Active, "2024-02-01", "2024-03-08"),
        ("4", "David Thompson", "david.thompson@example.com", MemberRole::Admin, Status::Active, "2023-08-15", "2024-03-10"),
        ("5", "Lisa Wang", "lisa.wang@example.com", MemberRole::Member, Status::Inactive, "2023-12-10", "2024-02-15"),
    ];

    rows.into_iter()
        .map(|(id, name, email, role, status, joined, last_active)| Member {
            id: id.to_string(),
            name: name.to_string(),
            email: email.to_string(),
            role,
            status,
            joined_at: date(joined),
            last_active: date(last_active),
        })
        .collect()
}

/// Profile shown on the member Info tab
pub fn trainee() -> TraineeProfile {
    TraineeProfile {
        full_name: "Alex Carter".to_string(),
        email: "trainee@trainify.com".to_string(),
        phone: "555-010-2030".to_string(),
        height_cm: 178.0,
        weight_kg: 76.0,
        age: 29,
        gender: Gender::Male,
        joined_at: date("2024-01-10"),
    }
}

pub fn workouts() -> Vec<Workout> {
    let rows: [(&str, &str, &str, Option<&str>, u32, ProgramLevel, u32, &[&str]); 6] = [
        (
            "1",
            "Full Body Burn",
            "High-energy circuit that works every major muscle group.",
            Some("A fast-paced circuit alternating strength and cardio moves. Rest 30 seconds between exercises and 2 minutes between rounds. Complete three rounds."),
            45,
            ProgramLevel::Intermediate,
            420,
            &["Jump squats", "Push-ups", "Kettlebell swings", "Mountain climbers", "Plank"],
        ),
        (
            "2",
            "Morning Mobility",
            "Gentle flow to loosen hips, shoulders and spine.",
            None,
            20,
            ProgramLevel::Beginner,
            90,
            &["Cat-cow", "World's greatest stretch", "Thoracic rotations", "Hip circles"],
        ),
        (
            "3",
            "Upper Body Strength",
            "Compound pressing and pulling for chest, back and arms.",
            Some("Work up to a heavy set of 6 on each compound lift, then finish with accessory supersets of 12 reps."),
            60,
            ProgramLevel::Advanced,
            380,
            &["Bench press", "Weighted pull-ups", "Overhead press", "Barbell rows", "Dips"],
        ),
        (
            "4",
            "Core Crusher",
            "Short, focused session for a stronger midsection.",
            None,
            25,
            ProgramLevel::Intermediate,
            180,
            &["Dead bugs", "Hanging knee raises", "Russian twists", "Side plank"],
        ),
        (
            "5",
            "Leg Day Essentials",
            "Squat and hinge patterns to build lower body power.",
            Some("Start with squats while fresh, then move to hinges and single-leg work. Keep two reps in reserve on every set."),
            55,
            ProgramLevel::Intermediate,
            450,
            &["Back squats", "Romanian deadlifts", "Walking lunges", "Leg press", "Calf raises"],
        ),
        (
            "6",
            "Beginner Cardio Intervals",
            "Walk-run intervals that build an aerobic base.",
            None,
            30,
            ProgramLevel::Beginner,
            250,
            &["5 min brisk walk", "1 min jog / 2 min walk x 6", "5 min cool-down walk"],
        ),
    ];

    rows.into_iter()
        .map(
            |(id, title, description, full_description, duration, level, calories, exercises)| Workout {
                id: id.to_string(),
                title: title.to_string(),
                description: description.to_string(),
                full_description: full_description.map(str::to_string),
                duration,
                level,
                calories,
                exercises: strings(exercises),
            },
        )
        .collect()
}

/// Member subscription that started two months before `today`
pub fn subscription_plan(today: NaiveDate) -> SubscriptionPlan {
    let start_date = today - Duration::days(60);
    SubscriptionPlan {
        tier: MealTier::Platinum,
        duration_months: 6,
        start_date,
        end_date: start_date + Duration::days(180),
        price: 299.99,
        features: strings(&[
            "Personalized meal plans",
            "Unlimited workout library",
            "Weekly trainer check-ins",
            "Progress tracking",
            "Priority support",
        ]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_price() {
        assert_eq!(format_price(49.99), "$49.99");
        assert_eq!(format_price(20.0), "$20.00");
    }

    #[test]
    fn test_format_date() {
        let d = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
        assert_eq!(format_date(d), "Jan 5, 2024");
    }

    #[test]
    fn test_sample_ids_are_unique() {
        let mut ids: Vec<String> = supplements().into_iter().map(|s| s.id).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), supplements().len());
        assert_eq!(meals().len(), 6);
        assert_eq!(members().len(), 5);
        assert_eq!(workouts().len(), 6);
    }

    #[test]
    fn test_sample_plan_is_running() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let plan = subscription_plan(today);
        assert_eq!(plan.remaining_days(today), 120);
        assert_eq!(plan.status(today).as_str(), "Active");
    }
}
