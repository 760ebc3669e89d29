//! End-to-end scenarios across the engine's public API

use approx::assert_abs_diff_eq;
use chrono::{NaiveDate, NaiveDateTime};

use liquid_engine::budget::{apply_feedback, BudgetRatios, BudgetState, Sentiment};
use liquid_engine::ledger::{load_transactions_from_reader, ExpenseGroup};
use liquid_engine::{
    aggregate, allocate, derive_limit, estimate_monthly_net, project, simulate, Category,
    FutureIncomeEvent, Profile, ProjectionConfig, ScenarioRunner, Transaction, TransactionKind,
};

fn at(year: i32, month: u32, day: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(year, month, day)
        .unwrap()
        .and_hms_opt(9, 30, 0)
        .unwrap()
}

fn tx(amount: f64, kind: TransactionKind, category: Category, when: NaiveDateTime) -> Transaction {
    Transaction::new(amount, kind, category, when, None).unwrap()
}

#[test]
fn test_balance_from_mixed_ledger() {
    let when = at(2026, 4, 10);
    let txs = vec![
        tx(90_000.0, TransactionKind::Income, Category::Salary, when),
        tx(15_000.0, TransactionKind::Expense, Category::Housing, when),
        tx(10_000.0, TransactionKind::Investment, Category::Investment, when),
    ];
    let summary = aggregate(50_000.0, &txs, when.date());

    assert_abs_diff_eq!(summary.current_balance, 115_000.0);
    assert_abs_diff_eq!(summary.monthly_income_actual, 90_000.0);
    assert_abs_diff_eq!(summary.monthly_expense_actual, 15_000.0);
    assert_eq!(summary.expense_by_category.len(), 1);
}

#[test]
fn test_balance_identity_over_random_ledgers() {
    // Simple LCG so the ledger is varied but reproducible
    let mut seed: u64 = 0x5eed;
    let mut next = move || {
        seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        seed >> 33
    };

    for _ in 0..20 {
        let mut txs = Vec::new();
        let (mut income, mut outflow) = (0.0, 0.0);
        for _ in 0..(next() % 30) {
            let amount = (next() % 100_000) as f64 / 100.0;
            let kind = match next() % 3 {
                0 => TransactionKind::Income,
                1 => TransactionKind::Expense,
                _ => TransactionKind::Investment,
            };
            if kind == TransactionKind::Income {
                income += amount;
            } else {
                outflow += amount;
            }
            txs.push(tx(amount, kind, Category::Other, at(2026, 1 + (next() % 12) as u32, 1)));
        }

        let summary = aggregate(1_234.5, &txs, NaiveDate::from_ymd_opt(2026, 6, 1).unwrap());
        assert_abs_diff_eq!(summary.current_balance, 1_234.5 + income - outflow, epsilon = 1e-6);
    }
}

#[test]
fn test_month_filter_is_inclusive_of_first_instant() {
    let first = NaiveDate::from_ymd_opt(2026, 3, 1).unwrap().and_hms_opt(0, 0, 0).unwrap();
    let next_month = NaiveDate::from_ymd_opt(2026, 4, 1).unwrap().and_hms_opt(0, 0, 0).unwrap();
    let txs = vec![
        tx(100.0, TransactionKind::Expense, Category::Food, first),
        tx(200.0, TransactionKind::Expense, Category::Food, next_month),
    ];
    let summary = aggregate(0.0, &txs, NaiveDate::from_ymd_opt(2026, 3, 31).unwrap());
    assert_abs_diff_eq!(summary.monthly_expense_actual, 100.0);
}

#[test]
fn test_empty_ledger() {
    let summary = aggregate(0.0, &[], NaiveDate::from_ymd_opt(2026, 1, 1).unwrap());
    assert_eq!(summary.current_balance, 0.0);
    assert_eq!(summary.monthly_income_actual, 0.0);
    assert!(summary.expense_by_category.is_empty());
}

#[test]
fn test_top_categories_merge_remainder() {
    let when = at(2026, 2, 2);
    let categories = [
        Category::Housing,
        Category::Food,
        Category::Transport,
        Category::Shopping,
        Category::Health,
        Category::Utilities,
        Category::Entertainment,
    ];
    let txs: Vec<Transaction> = categories
        .iter()
        .enumerate()
        .map(|(i, &c)| tx(1_000.0 * (7 - i) as f64, TransactionKind::Expense, c, when))
        .collect();

    let top = aggregate(0.0, &txs, when.date()).top_categories(5);
    assert_eq!(top.len(), 5);
    assert_eq!(top[0].group, ExpenseGroup::Category(Category::Housing));
    assert_eq!(top[4].group, ExpenseGroup::Remainder);
    // Utilities + Entertainment + Health
    assert_abs_diff_eq!(top[4].total, 2_000.0 + 1_000.0 + 3_000.0);
}

#[test]
fn test_allocation_and_limit() {
    let ratios = BudgetRatios::new(50, 30, 20).unwrap();
    let allocation = allocate(100_000.0, &ratios).unwrap();

    assert_abs_diff_eq!(allocation.needs_amount, 50_000.0);
    assert_abs_diff_eq!(allocation.wants_amount, 30_000.0);
    assert_abs_diff_eq!(allocation.savings_amount, 20_000.0);
    assert_eq!(derive_limit(100_000.0, 50, 30).unwrap(), 80_000);
    assert!(derive_limit(f64::NAN, 50, 30).is_err());
}

#[test]
fn test_feedback_relaxes_budget() {
    let state = BudgetState::new(BudgetRatios::new(50, 30, 20).unwrap(), 30_000);
    let outcome = apply_feedback(&state, Sentiment::TooStrict, at(2026, 10, 17));

    assert_eq!(outcome.state.ratios.wants_percent, 33);
    assert_eq!(outcome.state.ratios.savings_percent, 17);
    assert_eq!(outcome.state.monthly_limit, 31_500);
}

#[test]
fn test_feedback_preserves_needs_and_total() {
    let mut state = BudgetState::new(BudgetRatios::new(40, 35, 25).unwrap(), 50_000);
    let sentiments = [
        Sentiment::TooEasy,
        Sentiment::TooStrict,
        Sentiment::Good,
        Sentiment::TooEasy,
        Sentiment::TooEasy,
        Sentiment::TooStrict,
    ];
    for sentiment in sentiments {
        let outcome = apply_feedback(&state, sentiment, at(2026, 1, 1));
        assert_eq!(outcome.state.ratios.needs_percent, 40);
        assert_eq!(outcome.state.ratios.total(), 100);
        state = outcome.state;
    }
}

#[test]
fn test_repeated_good_is_noop() {
    let state = BudgetState::default();
    let once = apply_feedback(&state, Sentiment::Good, at(2026, 1, 1)).state;
    let twice = apply_feedback(&once, Sentiment::Good, at(2026, 2, 1)).state;
    assert_eq!(twice, state);
}

#[test]
fn test_projection_snapshot_count_and_growth() {
    let profile = Profile {
        monthly_income: 75_000.0,
        future_income: FutureIncomeEvent::new(120_000.0, 30, "promotion"),
        ..Profile::default()
    };
    let config = ProjectionConfig::default();
    let result = project(&profile, &config).unwrap();

    assert_eq!(result.snapshots.len(), (config.months / 12 + 1) as usize);
    for pair in result.snapshots.windows(2) {
        assert!(pair[1].cumulative_saved > pair[0].cumulative_saved);
    }
}

#[test]
fn test_simulation_year_zero_interest() {
    for principal in [0.0, 1.0, 250_000.0] {
        for rate in [0.0, 7.5, 18.0] {
            let snapshots = simulate(principal, 0.0, rate, 10).unwrap();
            assert_eq!(snapshots[0].interest_earned, 0.0);
        }
    }
}

#[test]
fn test_simulation_flat_without_rate_or_contribution() {
    let snapshots = simulate(80_000.0, 0.0, 0.0, 6).unwrap();
    assert_eq!(snapshots.len(), 7);
    assert!(snapshots.iter().all(|s| s.balance == 80_000.0));
}

#[test]
fn test_simulation_first_year() {
    let snapshots = simulate(100_000.0, 15_000.0, 12.0, 1).unwrap();

    let mut expected = 100_000.0;
    for _ in 0..12 {
        expected = (expected + 15_000.0) * (1.0 + 12.0 / 100.0 / 12.0);
    }
    assert_eq!(snapshots[1].balance, expected);
}

#[test]
fn test_net_income_zero_pay() {
    assert_eq!(estimate_monthly_net(0.0).unwrap(), (-2_400_f64 / 12.0).floor() as i64);
    assert_eq!(estimate_monthly_net(0.0).unwrap(), -200);
}

#[test]
fn test_csv_ledger_to_projection() {
    let data = "\
id,amount,kind,category,timestamp,note
,85000,Income,Salary,2026-05-01 09:00:00,May salary
,22000,Expense,Housing,2026-05-02 10:00:00,Rent
,4000,Expense,Food & Dining,2026-05-05 20:15:00,
,10000,Investment,Investment,2026-05-07 11:00:00,SIP
";
    let txs = load_transactions_from_reader(data.as_bytes()).unwrap();
    assert_eq!(txs.len(), 4);

    let profile = Profile::default()
        .calibrate(150_000.0, &txs)
        .unwrap();
    let summary = aggregate(profile.base_balance, &txs, NaiveDate::from_ymd_opt(2026, 5, 31).unwrap());
    assert_abs_diff_eq!(summary.current_balance, 150_000.0);

    let profile = Profile {
        monthly_income: 85_000.0,
        ..profile
    };
    let runner = ScenarioRunner::new();
    let result = runner.run_projection(&profile, summary.current_balance).unwrap();
    assert_eq!(result.snapshots[0].projected_balance, 167_000.0);
}
