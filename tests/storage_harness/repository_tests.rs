//! Macro-generated test suite for repository contract validation.
//!
//! The `repository_tests!` macro generates a test module that validates a
//! [`Repositories`] bundle against the full contract: CRUD, not-found
//! errors, search (filter, sort, pagination), aggregates with child rows, and
//! concurrent access.
//!
//! # Usage
//!
//! ```rust,ignore
//! #[macro_use]
//! mod storage_harness;
//!
//! use storage_harness::*;
//!
//! repository_tests!(Repositories::in_memory());
//! ```
//!
//! # Generated Tests
//!
//! ## CRUD
//! - `test_insert_and_find_by_id`: insert then retrieve an equal entity
//! - `test_find_unknown_id`: `NotFound` with the id in the message
//! - `test_find_all`: every inserted entity comes back
//! - `test_update_existing`: a renamed entity is persisted with its audit stamp
//! - `test_update_unknown_id` / `test_delete_unknown_id`: `NotFound`
//! - `test_delete_existing`: deleted entities are gone
//! - `test_exists_by_name`: exact name match
//!
//! ## Search
//! - `test_search_default_pagination`: 16 rows give 15 items on page 1
//! - `test_search_default_order`: newest first
//! - `test_search_sort_by_name`: byte order, both directions
//! - `test_search_sort_by_created_at`: oldest first when ascending
//! - `test_search_filter_sort_paginate`: filter, sort and pages compose
//! - `test_search_empty`: no rows, no pages
//! - `test_search_huge_page`: a page far past the end is empty
//!
//! ## Aggregates
//! - `test_team_roles_round_trip` / `test_team_roles_replaced_on_update`
//! - `test_expense_invoices_round_trip` / `test_expense_invoices_replaced_on_update`
//! - `test_expense_without_invoices`
//! - `test_delete_aggregate_with_children`
//!
//! ## Edge Cases
//! - `test_concurrent_inserts`: parallel inserts from spawned tasks

/// Generate a full repository conformance test suite.
///
/// `$factory` must be an expression that evaluates to a `Repositories`
/// bundle. It is re-evaluated for each test to ensure isolation.
#[macro_export]
macro_rules! repository_tests {
    ($factory:expr) => {
        mod repository_contract_tests {
            use super::*;

            // ==================================================================
            // CRUD
            // ==================================================================

            #[tokio::test]
            async fn test_insert_and_find_by_id() {
                let repos = $factory;
                let budget = create_budget("Marketing", 0);

                repos.budgets.insert(&budget).await.unwrap();

                let found = repos.budgets.find_by_id(budget.id()).await.unwrap();
                assert_eq!(found, budget);
                assert_eq!(found.created_by(), "system");
                assert_eq!(found.updated_at(), found.created_at());
            }

            #[tokio::test]
            async fn test_find_unknown_id() {
                let repos = $factory;
                let id = UniqueEntityId::generate();

                let err = repos.budgets.find_by_id(id.value()).await.unwrap_err();
                assert_not_found(&err, id.value());
            }

            #[tokio::test]
            async fn test_find_all() {
                let repos = $factory;
                for budget in budget_batch(&["a", "b", "c"]) {
                    repos.budgets.insert(&budget).await.unwrap();
                }

                let all = repos.budgets.find_all().await.unwrap();
                assert_eq!(all.len(), 3);

                let mut names: Vec<&str> = all.iter().map(|b| b.name()).collect();
                names.sort();
                assert_eq!(names, ["a", "b", "c"]);
            }

            #[tokio::test]
            async fn test_update_existing() {
                let repos = $factory;
                let mut budget = create_budget("before", 0);
                repos.budgets.insert(&budget).await.unwrap();

                budget.change("after", "alice").unwrap();
                repos.budgets.update(&budget).await.unwrap();

                let found = repos.budgets.find_by_id(budget.id()).await.unwrap();
                assert_eq!(found.name(), "after");
                assert_eq!(found.created_by(), "system");
                assert_eq!(found.updated_by(), "alice");
                assert!(found.updated_at() > found.created_at());
            }

            #[tokio::test]
            async fn test_update_unknown_id() {
                let repos = $factory;
                let budget = create_budget("never stored", 0);

                let err = repos.budgets.update(&budget).await.unwrap_err();
                assert_not_found(&err, budget.id());
            }

            #[tokio::test]
            async fn test_delete_existing() {
                let repos = $factory;
                let budget = create_budget("doomed", 0);
                repos.budgets.insert(&budget).await.unwrap();

                repos.budgets.delete(budget.id()).await.unwrap();

                let err = repos.budgets.find_by_id(budget.id()).await.unwrap_err();
                assert_not_found(&err, budget.id());
                assert!(repos.budgets.find_all().await.unwrap().is_empty());
            }

            #[tokio::test]
            async fn test_delete_unknown_id() {
                let repos = $factory;
                let id = UniqueEntityId::generate();

                let err = repos.budgets.delete(id.value()).await.unwrap_err();
                assert_not_found(&err, id.value());
            }

            #[tokio::test]
            async fn test_exists_by_name() {
                let repos = $factory;
                repos
                    .budgets
                    .insert(&create_budget("Marketing", 0))
                    .await
                    .unwrap();

                assert!(repos.budgets.exists("Marketing").await.unwrap());
                assert!(!repos.budgets.exists("Sales").await.unwrap());
            }

            // ==================================================================
            // Search
            // ==================================================================

            #[tokio::test]
            async fn test_search_default_pagination() {
                let repos = $factory;
                let names: Vec<String> = (0..16).map(|i| format!("budget {:02}", i)).collect();
                let refs: Vec<&str> = names.iter().map(String::as_str).collect();
                for budget in budget_batch(&refs) {
                    repos.budgets.insert(&budget).await.unwrap();
                }

                let result = repos.budgets.search(&SearchParams::default()).await.unwrap();
                assert_eq!(result.items().len(), 15);
                assert_eq!(result.total(), 16);
                assert_eq!(result.current_page(), 1);
                assert_eq!(result.per_page(), 15);
                assert_eq!(result.last_page(), 2);
                assert_eq!(result.items()[0].name(), "budget 15");

                let second = repos
                    .budgets
                    .search(&SearchParams::new(SearchInput::default().page(2)))
                    .await
                    .unwrap();
                assert_names(&second, &["budget 00"]);
            }

            #[tokio::test]
            async fn test_search_huge_page() {
                let repos = $factory;
                for budget in budget_batch(&["first", "second"]) {
                    repos.budgets.insert(&budget).await.unwrap();
                }

                let params = SearchParams::new(SearchInput::default().page("1e30"));
                let result = repos.budgets.search(&params).await.unwrap();
                assert!(result.items().is_empty());
                assert_eq!(result.total(), 2);
                assert_eq!(result.last_page(), 1);
            }

            #[tokio::test]
            async fn test_search_default_order() {
                let repos = $factory;
                for budget in budget_batch(&["first", "second", "third"]) {
                    repos.budgets.insert(&budget).await.unwrap();
                }

                let result = repos.budgets.search(&SearchParams::default()).await.unwrap();
                assert_names(&result, &["third", "second", "first"]);
                assert_eq!(result.sort(), None);
                assert_eq!(result.sort_dir(), None);
            }

            #[tokio::test]
            async fn test_search_sort_by_name() {
                let repos = $factory;
                for budget in budget_batch(&["b", "a", "d", "e", "c"]) {
                    repos.budgets.insert(&budget).await.unwrap();
                }

                let asc = repos
                    .budgets
                    .search(&SearchParams::new(SearchInput::default().sort("name")))
                    .await
                    .unwrap();
                assert_names(&asc, &["a", "b", "c", "d", "e"]);
                assert_eq!(asc.sort_dir(), Some(SortDirection::Asc));

                let desc = repos
                    .budgets
                    .search(&SearchParams::new(
                        SearchInput::default().sort("name").sort_dir("DESC"),
                    ))
                    .await
                    .unwrap();
                assert_names(&desc, &["e", "d", "c", "b", "a"]);
            }

            #[tokio::test]
            async fn test_search_sort_by_created_at() {
                let repos = $factory;
                for budget in budget_batch(&["first", "second", "third"]) {
                    repos.budgets.insert(&budget).await.unwrap();
                }

                let result = repos
                    .budgets
                    .search(&SearchParams::new(SearchInput::default().sort("created_at")))
                    .await
                    .unwrap();
                assert_names(&result, &["first", "second", "third"]);
            }

            #[tokio::test]
            async fn test_search_filter_sort_paginate() {
                let repos = $factory;
                for budget in budget_batch(&["test", "a", "TEST", "e", "TeSt"]) {
                    repos.budgets.insert(&budget).await.unwrap();
                }

                let input = || {
                    SearchInput::default()
                        .per_page(2)
                        .sort("name")
                        .sort_dir("asc")
                        .filter("TEST")
                };

                let first = repos
                    .budgets
                    .search(&SearchParams::new(input().page(1)))
                    .await
                    .unwrap();
                assert_names(&first, &["TEST", "TeSt"]);
                assert_eq!(first.total(), 3);
                assert_eq!(first.last_page(), 2);
                assert_eq!(first.filter(), Some("TEST"));

                let second = repos
                    .budgets
                    .search(&SearchParams::new(input().page(2)))
                    .await
                    .unwrap();
                assert_names(&second, &["test"]);
                assert_eq!(second.total(), 3);
            }

            #[tokio::test]
            async fn test_search_empty() {
                let repos = $factory;

                let result = repos
                    .budgets
                    .search(&SearchParams::new(SearchInput::default().filter("nothing")))
                    .await
                    .unwrap();
                assert!(result.items().is_empty());
                assert_eq!(result.total(), 0);
                assert_eq!(result.last_page(), 0);
            }

            // ==================================================================
            // Aggregates
            // ==================================================================

            #[tokio::test]
            async fn test_team_roles_round_trip() {
                let repos = $factory;
                let team = create_team("Platform");
                repos.teams.insert(&team).await.unwrap();

                let found = repos.teams.find_by_id(team.id()).await.unwrap();
                assert_eq!(found, team);
                assert_eq!(found.roles().len(), 3);
            }

            #[tokio::test]
            async fn test_team_roles_replaced_on_update() {
                let repos = $factory;
                let mut team = create_team("Platform");
                repos.teams.insert(&team).await.unwrap();

                let roles = vec![
                    create_role(RoleName::Manager, 2, 10),
                    create_role(RoleName::Analyst, 1, 11),
                    create_role(RoleName::Deputy, 0, 12),
                ];
                team.change("Platform", roles.clone(), "alice").unwrap();
                repos.teams.update(&team).await.unwrap();

                let found = repos.teams.find_by_id(team.id()).await.unwrap();
                assert_eq!(found.roles(), roles.as_slice());
                assert_eq!(found.updated_by(), "alice");
            }

            #[tokio::test]
            async fn test_expense_invoices_round_trip() {
                let repos = $factory;
                let expense = create_expense(
                    "Cloud",
                    Some(vec![
                        create_invoice(500.25, InvoiceStatus::Actual, 0),
                        create_invoice(1000.25, InvoiceStatus::Plan, 1),
                    ]),
                );
                repos.expenses.insert(&expense).await.unwrap();

                let found = repos.expenses.find_by_id(expense.id()).await.unwrap();
                assert_eq!(found, expense);
                assert_eq!(found.purchase_request(), Some("1234567890"));
                assert_eq!(found.invoices().map(<[Invoice]>::len), Some(2));
            }

            #[tokio::test]
            async fn test_expense_invoices_replaced_on_update() {
                let repos = $factory;
                let mut expense = create_expense(
                    "Cloud",
                    Some(vec![create_invoice(500.25, InvoiceStatus::Plan, 0)]),
                );
                repos.expenses.insert(&expense).await.unwrap();

                let replacement = create_invoice(750.0, InvoiceStatus::Actual, 5);
                expense
                    .update_invoices(vec![replacement.clone()], "alice")
                    .unwrap();
                repos.expenses.update(&expense).await.unwrap();

                let found = repos.expenses.find_by_id(expense.id()).await.unwrap();
                assert_eq!(found.invoices(), Some([replacement].as_slice()));
            }

            #[tokio::test]
            async fn test_expense_without_invoices() {
                let repos = $factory;
                let expense = create_expense("Licenses", None);
                repos.expenses.insert(&expense).await.unwrap();

                let found = repos.expenses.find_by_id(expense.id()).await.unwrap();
                assert_eq!(found.invoices(), None);
                assert_eq!(found.team_id().value(), TEAM_ID);
                assert_eq!(found.budget_id().value(), BUDGET_ID);
            }

            #[tokio::test]
            async fn test_delete_aggregate_with_children() {
                let repos = $factory;
                let team = create_team("Platform");
                repos.teams.insert(&team).await.unwrap();

                repos.teams.delete(team.id()).await.unwrap();

                let err = repos.teams.find_by_id(team.id()).await.unwrap_err();
                assert_not_found(&err, team.id());

                // The same child ids can be stored again
                let again = Team::new(
                    TeamProps {
                        name: "Platform".to_string(),
                        roles: team.roles().to_vec(),
                    },
                    audit_at(0),
                    None,
                )
                .unwrap();
                repos.teams.insert(&again).await.unwrap();
            }

            // ==================================================================
            // Edge Cases
            // ==================================================================

            #[tokio::test]
            async fn test_concurrent_inserts() {
                let repos = $factory;
                let budgets = budget_batch(&["a", "b", "c", "d", "e", "f", "g", "h"]);

                let handles: Vec<_> = budgets
                    .into_iter()
                    .map(|budget| {
                        let repo = repos.budgets.clone();
                        tokio::spawn(async move { repo.insert(&budget).await })
                    })
                    .collect();

                for result in futures::future::join_all(handles).await {
                    result.unwrap().unwrap();
                }

                let result = repos.budgets.search(&SearchParams::default()).await.unwrap();
                assert_eq!(result.total(), 8);
            }
        }
    };
}
