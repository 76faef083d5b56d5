//! Decision Resolver integration tests
//!
//! Rules are authored through `RuleAuthoring`, so every fixture also passes
//! the validation and compilation chain.

mod common;

use common::{charge, FailingRuleRepository, SlowRuleRepository, TestEnv};
use fraudgate_core::{
    ComponentName, ConsoleComponent, ListEntry, ListType, Operator, RuleClause, Scope,
};
use fraudgate_runtime::{StaticScoreClient, UNAVAILABLE_SCORE};
use fraudgate_sdk::*;
use std::sync::Arc;
use std::time::Duration;

fn amount_over(decision: &str, limit: i32) -> RuleRequest {
    RuleRequest::new(decision, vec![RuleClause::field("amount", Operator::Gt, limit)])
}

// =============================================================================
// Aggregation
// =============================================================================

#[tokio::test]
async fn test_whitelist_wins_over_declining_company_rule() {
    let env = TestEnv::with_entries(vec![ListEntry::new(
        "wl-1",
        ListType::White,
        "payer.email",
        "buyer@example.com",
        Decision::Accepted,
    )]);
    env.rule(amount_over("declined", 1000).for_company("c1")).await;

    let console = Console::new(vec![
        ConsoleComponent::new(ComponentName::Whitelist, vec![Decision::Accepted]),
        ConsoleComponent::new(
            ComponentName::CompanyRules,
            vec![Decision::Accepted, Decision::Declined, Decision::Undecided],
        ),
    ]);
    let engine = env.builder().with_default_console(console).build().unwrap();

    let response = engine.decide_charge(&charge()).await.unwrap();
    assert_eq!(response.decision(), Decision::Accepted);
    assert_eq!(response.decided_by(), Some(ComponentName::Whitelist));

    let company = response.verdict.component(ComponentName::CompanyRules).unwrap();
    assert_eq!(company.decision, Decision::Declined);
    assert!(response.request_id.starts_with("req_"));
    assert_eq!(response.charge_id, "ch_test");
}

#[tokio::test]
async fn test_blacklisted_card_declines_under_default_console() {
    let env = TestEnv::with_entries(vec![ListEntry::new(
        "bl-1",
        ListType::Black,
        "payment_method.card_hash",
        "hash-1",
        Decision::Declined,
    )]);
    env.rule(amount_over("accepted", 10).global()).await;

    let engine = env.builder().build().unwrap();
    let response = engine.decide_charge(&charge()).await.unwrap();

    assert_eq!(response.decision(), Decision::Declined);
    assert_eq!(response.decided_by(), Some(ComponentName::Blacklist));
    assert_eq!(response.verdict.components.len(), 9);
    assert_eq!(
        response.verdict.component(ComponentName::GlobalRules).unwrap().decision,
        Decision::Accepted
    );
}

#[tokio::test]
async fn test_nothing_matches_is_undecided() {
    let env = TestEnv::new();
    env.rule(amount_over("declined", 100000).for_company("c1")).await;

    let engine = env.builder().build().unwrap();
    let response = engine.decide_charge(&charge()).await.unwrap();
    assert_eq!(response.decision(), Decision::Undecided);
    assert_eq!(response.decided_by(), None);
}

#[tokio::test]
async fn test_component_priority_breaks_ties() {
    let env = TestEnv::new();
    env.rule(amount_over("accepted", 1000).for_company("c1")).await;
    env.rule(amount_over("declined", 2000).for_company("c1")).await;

    let accept_first = Console::new(vec![ConsoleComponent::new(
        ComponentName::CompanyRules,
        vec![Decision::Accepted, Decision::Declined],
    )]);
    let engine = env.builder().with_default_console(accept_first).build().unwrap();
    assert_eq!(
        engine.decide_charge(&charge()).await.unwrap().decision(),
        Decision::Accepted
    );

    let mut declined_first = charge();
    declined_first.console = Some(Console::new(vec![ConsoleComponent::new(
        ComponentName::CompanyRules,
        vec![Decision::Declined, Decision::Accepted],
    )]));
    assert_eq!(
        engine.decide_charge(&declined_first).await.unwrap().decision(),
        Decision::Declined
    );
}

// =============================================================================
// Test rules, special components and scopes
// =============================================================================

#[tokio::test]
async fn test_shadow_rules_only_set_test_decision() {
    let env = TestEnv::new();
    env.rule(amount_over("declined", 1000).for_company("c1").test()).await;

    let engine = env.builder().build().unwrap();
    let response = engine.decide_charge(&charge()).await.unwrap();

    assert_eq!(response.decision(), Decision::Undecided);
    assert_eq!(response.test_decision(), Decision::Declined);
    assert_eq!(
        response.verdict.test_decided_by,
        Some(ComponentName::CompanyRules)
    );
}

#[tokio::test]
async fn test_family_scoped_rules() {
    let env = TestEnv::new();
    env.family("c1", "f-retail", &["fc-9"]).await;
    env.rule(amount_over("declined", 5000).for_family("f-retail")).await;
    env.rule(amount_over("accepted", 5000).for_family_company("fc-9")).await;
    env.rule(amount_over("accepted", 1).for_family("f-other")).await;

    let engine = env.builder().build().unwrap();
    let response = engine.decide_charge(&charge()).await.unwrap();

    // family_company_rules precedes family_mcc_rules in the default console
    assert_eq!(response.decision(), Decision::Accepted);
    assert_eq!(response.decided_by(), Some(ComponentName::FamilyCompanyRules));
    let mcc = response.verdict.component(ComponentName::FamilyMccRules).unwrap();
    assert_eq!(mcc.decision, Decision::Declined);
    assert_eq!(mcc.matched.len(), 1);
}

#[tokio::test]
async fn test_identity_rules_are_served_by_identity_module_only() {
    let env = TestEnv::new();
    env.rule(
        RuleRequest::new(
            "declined",
            vec![RuleClause::field("identity.email_age_days", Operator::Lt, 7)],
        )
        .for_company("c1"),
    )
    .await;

    let engine = env.builder().build().unwrap();
    let response = engine.decide_charge(&charge()).await.unwrap();

    assert_eq!(response.decided_by(), Some(ComponentName::IdentityModule));
    assert!(response
        .verdict
        .component(ComponentName::CompanyRules)
        .unwrap()
        .matched
        .is_empty());
}

#[tokio::test]
async fn test_yellow_flags_match_without_deciding() {
    let env = TestEnv::new();
    env.rule(amount_over("undecided", 5000).for_company("c1").yellow_flag()).await;
    env.rule(amount_over("undecided", 1).global().yellow_flag()).await;

    let engine = env.builder().build().unwrap();
    let response = engine.decide_charge(&charge()).await.unwrap();

    assert_eq!(response.decision(), Decision::Undecided);
    let flags = response.verdict.component(ComponentName::YellowFlag).unwrap();
    assert_eq!(flags.matched.len(), 2);
    assert!(response
        .verdict
        .component(ComponentName::CompanyRules)
        .unwrap()
        .matched
        .is_empty());
}

#[tokio::test]
async fn test_list_entry_scoped_to_other_company_is_ignored() {
    let env = TestEnv::with_entries(vec![ListEntry::new(
        "bl-other",
        ListType::Black,
        "payer.email",
        "buyer@example.com",
        Decision::Declined,
    )
    .with_scope(Scope::Company("c2".to_string()))]);

    let engine = env.builder().build().unwrap();
    let response = engine.decide_charge(&charge()).await.unwrap();
    assert_eq!(response.decision(), Decision::Undecided);
}

// =============================================================================
// Scores
// =============================================================================

#[tokio::test]
async fn test_scores_are_merged_into_attributes() {
    let env = TestEnv::new();
    env.rule(
        RuleRequest::new(
            "declined",
            vec![RuleClause::field("omniscore", Operator::Ge, 0.9)],
        )
        .global(),
    )
    .await;

    let engine = env
        .builder()
        .with_omniscore(Arc::new(StaticScoreClient::new("omniscore", 0.95)))
        .with_merchant_score(Arc::new(StaticScoreClient::failing("merchant_score")))
        .build()
        .unwrap();

    let response = engine.decide_charge(&charge()).await.unwrap();
    assert_eq!(response.omniscore, 0.95);
    assert_eq!(response.merchant_score, UNAVAILABLE_SCORE);
    assert_eq!(response.decision(), Decision::Declined);
}

#[tokio::test]
async fn test_missing_score_client_reads_as_sentinel() {
    let env = TestEnv::new();
    env.rule(
        RuleRequest::new(
            "undecided",
            vec![RuleClause::field("merchant_score", Operator::Eq, -1)],
        )
        .global()
        .yellow_flag(),
    )
    .await;

    let engine = env.builder().build().unwrap();
    let response = engine.decide_charge(&charge()).await.unwrap();
    let flags = response.verdict.component(ComponentName::YellowFlag).unwrap();
    assert_eq!(flags.matched.len(), 1);
}

// =============================================================================
// Failure paths
// =============================================================================

#[tokio::test]
async fn test_rule_errors_are_recorded_not_fatal() {
    let env = TestEnv::new();
    env.rule(
        RuleRequest::new(
            "declined",
            vec![RuleClause::field("device.fingerprint", Operator::Eq, "fp-1")],
        )
        .for_company("c1"),
    )
    .await;

    let engine = env.builder().build().unwrap();
    let response = engine.decide_charge(&charge()).await.unwrap();
    assert_eq!(response.decision(), Decision::Undecided);
    assert_eq!(response.verdict.errors.len(), 1);
    assert_eq!(response.verdict.errors[0].component, ComponentName::CompanyRules);
}

#[tokio::test]
async fn test_repository_error_is_fatal() {
    let engine = DecisionEngineBuilder::new()
        .with_rule_repository(Arc::new(FailingRuleRepository))
        .build()
        .unwrap();

    let err = engine.decide_charge(&charge()).await.unwrap_err();
    assert!(matches!(err, SdkError::Repository(_)));
}

#[tokio::test]
async fn test_cancelled_decision() {
    let env = TestEnv::new();
    env.rule(amount_over("declined", 1).global()).await;
    let engine = env.builder().build().unwrap();

    let cancel = CancellationToken::new();
    cancel.cancel();
    let err = engine.decide(&charge(), &cancel).await.unwrap_err();
    assert!(matches!(err, SdkError::Cancelled));
}

#[tokio::test(start_paused = true)]
async fn test_slow_repository_hits_deadline() {
    let engine = DecisionEngineBuilder::new()
        .with_rule_repository(Arc::new(SlowRuleRepository {
            delay: Duration::from_secs(10),
        }))
        .with_fetch_timeout(Duration::from_millis(50))
        .build()
        .unwrap();

    let err = engine.decide_charge(&charge()).await.unwrap_err();
    assert!(matches!(err, SdkError::DeadlineExceeded(_)));
}

#[tokio::test(start_paused = true)]
async fn test_cancel_during_fetch() {
    let engine = DecisionEngineBuilder::new()
        .with_rule_repository(Arc::new(SlowRuleRepository {
            delay: Duration::from_secs(1),
        }))
        .build()
        .unwrap();

    let cancel = CancellationToken::new();
    let trigger = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(100)).await;
        trigger.cancel();
    });

    let err = engine.decide(&charge(), &cancel).await.unwrap_err();
    assert!(matches!(err, SdkError::Cancelled));
}

#[tokio::test]
async fn test_charge_console_with_repeated_component() {
    let engine = DecisionEngineBuilder::new().build().unwrap();
    let mut repeated = charge();
    repeated.console = Some(Console::new(vec![
        ConsoleComponent::new(ComponentName::Whitelist, vec![Decision::Accepted]),
        ConsoleComponent::new(ComponentName::Whitelist, vec![Decision::Accepted]),
    ]));

    let err = engine.decide_charge(&repeated).await.unwrap_err();
    assert!(matches!(err, SdkError::InvalidConsole(_)));
}

#[tokio::test]
async fn test_sequential_fetch_matches_concurrent() {
    let env = TestEnv::with_entries(vec![ListEntry::new(
        "gl-1",
        ListType::Gray,
        "payer.phone",
        "5550001111",
        Decision::Declined,
    )]);
    env.rule(amount_over("accepted", 1000).for_company("c1")).await;
    env.rule(amount_over("declined", 1000).global().test()).await;

    let concurrent = env.builder().build().unwrap();
    let sequential = env.builder().concurrent_fetch(false).build().unwrap();

    let a = concurrent.decide_charge(&charge()).await.unwrap();
    let b = sequential.decide_charge(&charge()).await.unwrap();
    assert_eq!(a.verdict, b.verdict);
    assert_eq!(a.decided_by(), Some(ComponentName::Graylist));
    assert_eq!(a.test_decision(), Decision::Declined);
}
