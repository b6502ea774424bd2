/// dashboard - spending breakdown and budget utilization for a month
use chrono::NaiveDate;
use debt_balance_rs::{
    BudgetGoal, CategoryKind, CategoryRegistry, DashboardReport, Money, PeriodType, Transaction,
    TransactionKind, Uuid,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let user = Uuid::new_v4();
    let mut categories = CategoryRegistry::new();
    let (groceries, _) = categories.lookup_or_insert(user, "Groceries", CategoryKind::Expense)?;
    let (coffee, _) = categories.lookup_or_insert(user, "coffee", CategoryKind::Expense)?;

    let day = |d| NaiveDate::from_ymd_opt(2024, 3, d).ok_or("bad date");
    let transactions = vec![
        Transaction {
            date: day(4)?,
            amount: Money::from_major(85),
            kind: TransactionKind::Expense,
            category: Some(groceries.name.clone()),
        },
        Transaction {
            date: day(6)?,
            amount: Money::from_major(12),
            kind: TransactionKind::Expense,
            category: Some(coffee.name.clone()),
        },
        Transaction {
            date: day(15)?,
            amount: Money::from_major(1_200),
            kind: TransactionKind::Income,
            category: None,
        },
    ];
    let goals = vec![BudgetGoal {
        id: Uuid::new_v4(),
        category: groceries.name.clone(),
        category_kind: CategoryKind::Expense,
        period: PeriodType::Month,
        amount: Money::from_major(300),
    }];

    let report = DashboardReport::build(PeriodType::Month, 0, day(20)?, &transactions, &goals)?;
    for row in &report.budget_data {
        let used = row
            .utilization()
            .map(|r| r.to_string())
            .unwrap_or_else(|| "no budget".to_string());
        println!("{:<12} spent ${:>8} of ${:>8} ({})", row.category, row.spent, row.budget, used);
    }
    println!("net for {} - {}: ${}", report.date_range.start, report.date_range.end, report.totals.net);

    Ok(())
}
