//! End-to-end filler tests against the scripted surface backend.
//!
//! All tests run with near-zero delays and a paused tokio clock, so
//! suspensions and presence timeouts cost no wall time.

use super::fake::{count_clicks, count_keys, Action, FakePanel, FakeSurface};
use super::init_tracing;
use crate::errors::AutomationError;
use crate::fill::ingredients::flatten_entries;
use crate::fill::{selectors, NullPanel, RecipeFiller, RunOutcome};
use crate::recipe::RecipeDocument;
use crate::timing::Delays;
use crate::Surface;
use std::sync::Arc;

const SETTINGS_URL: &str = "https://recipes.example/created-recipes/fr-FR/R4F7K2/edit";
const INGREDIENTS_URL: &str =
    "https://recipes.example/created-recipes/fr-FR/R4F7K2/edit/ingredients-and-preparation?active=ingredients";
const STEPS_URL: &str =
    "https://recipes.example/created-recipes/fr-FR/R4F7K2/edit/ingredients-and-preparation?active=steps";

fn sample_recipe() -> String {
    serde_json::json!({
        "titre": "Velouté de potimarron",
        "tempsPreparation": 125,
        "tempsTotal": 45,
        "portions": 6,
        "ingredients": [
            {"categorie": "Légumes", "items": [
                {"nom": "potimarron", "quantite": "800", "unite": "g"},
                {"nom": "oignon", "quantite": "1", "notes": "émincé"},
                {"nom": "ail"}
            ]},
            {"categorie": "Assaisonnement", "items": [
                {"nom": "sel", "quantite": "1", "unite": "c. à café"},
                {"nom": "poivre"}
            ]}
        ],
        "etapes": [
            {"titre": "Préparer", "description": "Couper les légumes",
             "duree": "5 min", "vitesse": "Vitesse 5"},
            {"titre": "Cuire", "description": "Cuire le tout", "duree": "20 min",
             "temperature": "100°", "vitesse": "Mijotage doux"},
            {"titre": "Mixer", "description": "Mixer finement",
             "vitesse": "Vitesse 9", "details": "Sens Inverse"}
        ],
        "conseils": ["Servir chaud"]
    })
    .to_string()
}

fn filler(fake: &Arc<FakeSurface>) -> RecipeFiller {
    RecipeFiller::new(Surface::new(fake.clone()), Arc::new(NullPanel)).with_delays(Delays::none())
}

fn has_set_text(actions: &[Action], key: &str, value: &str) -> bool {
    actions
        .iter()
        .any(|a| matches!(a, Action::SetText(k, v) if k == key && v == value))
}

fn ever_touched(actions: &[Action], key: &str) -> bool {
    actions.iter().any(|a| {
        matches!(a,
            Action::Click(k) | Action::Focus(k) | Action::Clear(k)
            | Action::SetText(k, _) | Action::Insert(k, _) | Action::Key(k, _)
            | Action::CaretToEnd(k) | Action::ScrollIntoView(k) if k == key)
    })
}

#[test]
fn flattened_entries_interleave_headers_with_items() {
    let doc = RecipeDocument::from_json(&sample_recipe()).unwrap();
    let entries = flatten_entries(&doc);

    assert_eq!(entries.len(), 7, "2 headers + 5 items");
    assert_eq!(entries[0], "--- Légumes ---");
    assert_eq!(entries[1], "800 g potimarron");
    assert_eq!(entries[2], "1 oignon (émincé)");
    assert_eq!(entries[3], "ail");
    assert_eq!(entries[4], "--- Assaisonnement ---");
    assert_eq!(entries[5], "1 c. à café sel");
    assert_eq!(entries[6], "poivre");
}

#[tokio::test(start_paused = true)]
async fn ingredients_filler_commits_one_fewer_than_entries() {
    init_tracing();
    let fake = Arc::new(FakeSurface::new(INGREDIENTS_URL));
    fake.add(selectors::INGREDIENT_FIELDS);

    let outcome = filler(&fake).run(&sample_recipe()).await.unwrap();
    assert_eq!(outcome, RunOutcome::IngredientsFilled);

    let actions = fake.actions();
    let field_key = FakeSurface::key(selectors::INGREDIENT_FIELDS);
    assert_eq!(
        actions.iter().filter(|a| matches!(a, Action::Clear(k) if *k == field_key)).count(),
        7,
        "one field write per flattened entry"
    );
    assert_eq!(count_keys(&actions, "Enter"), 6, "commit all entries but the last");
}

#[tokio::test(start_paused = true)]
async fn steps_filler_advances_through_each_slot() {
    init_tracing();
    let fake = Arc::new(FakeSurface::new(STEPS_URL));
    fake.add(selectors::STEP_FIELDS);

    let outcome = filler(&fake).run(&sample_recipe()).await.unwrap();
    assert_eq!(outcome, RunOutcome::StepsFilled);

    let actions = fake.actions();
    let field_key = FakeSurface::key(selectors::STEP_FIELDS);
    assert_eq!(
        actions.iter().filter(|a| matches!(a, Action::Clear(k) if *k == field_key)).count(),
        3,
        "one slot per step"
    );
    assert_eq!(count_keys(&actions, "Enter"), 2, "commit all steps but the last");
}

#[tokio::test(start_paused = true)]
async fn cooking_parameters_follow_the_parsed_fields() {
    init_tracing();
    let fake = Arc::new(FakeSurface::new(STEPS_URL));
    fake.add(selectors::STEP_FIELDS);
    fake.add(selectors::ACTIVE_STEP_PARAMS);
    fake.add(selectors::PARAMS_MINUTES_INPUT);
    fake.add(selectors::PARAMS_SECONDS_INPUT);
    fake.add(selectors::PARAMS_SAVE);
    fake.add(selectors::REVERSE_DIRECTION_RADIO);
    fake.add(&selectors::temperature_radio(100));
    for token in ["5", "soft", "9"] {
        fake.add(&selectors::speed_radio(token));
    }

    filler(&fake).run(&sample_recipe()).await.unwrap();

    let actions = fake.actions();
    let minutes_key = FakeSurface::key(selectors::PARAMS_MINUTES_INPUT);
    let seconds_key = FakeSurface::key(selectors::PARAMS_SECONDS_INPUT);
    assert!(has_set_text(&actions, &minutes_key, "5"));
    assert!(has_set_text(&actions, &minutes_key, "20"));
    assert!(
        !ever_touched(&actions, &seconds_key),
        "no step has a seconds component"
    );

    assert_eq!(
        count_clicks(&actions, &FakeSurface::key(&selectors::temperature_radio(100))),
        1
    );
    assert_eq!(
        count_clicks(&actions, &FakeSurface::key(&selectors::speed_radio("soft"))),
        1
    );

    // Reverse direction must be selected before the speed radio of the
    // step that requests it.
    let reverse_key = FakeSurface::key(selectors::REVERSE_DIRECTION_RADIO);
    let speed9_key = FakeSurface::key(&selectors::speed_radio("9"));
    let reverse_pos = actions
        .iter()
        .position(|a| matches!(a, Action::Click(k) if *k == reverse_key))
        .expect("reverse direction clicked");
    let speed_pos = actions
        .iter()
        .position(|a| matches!(a, Action::Click(k) if *k == speed9_key))
        .expect("speed radio clicked");
    assert!(reverse_pos < speed_pos);
}

#[tokio::test(start_paused = true)]
async fn invalid_document_touches_no_surface() {
    init_tracing();
    let fake = Arc::new(FakeSurface::new(SETTINGS_URL));
    let panel = Arc::new(FakePanel::default());
    let filler = RecipeFiller::new(Surface::new(fake.clone()), panel.clone())
        .with_delays(Delays::none());

    let raw = r#"{"title": "Soupe", "ingredientGroups": [{"categoryLabel": "Base", "items": [{"name": "eau"}]}]}"#;
    let err = filler.run(raw).await.unwrap_err();
    assert!(matches!(err, AutomationError::InvalidDocument(_)));

    assert_eq!(fake.probe_count(), 0, "validation must precede any surface call");
    assert!(fake.actions().is_empty());
    assert!(panel.busy.lock().unwrap().is_empty(), "input never disabled");
}

#[tokio::test(start_paused = true)]
async fn picker_timeout_skips_only_that_ingredient() {
    init_tracing();
    let fake = Arc::new(FakeSurface::new(STEPS_URL));
    fake.add(selectors::STEP_FIELDS);
    fake.add(selectors::ACTIVE_STEP_ATTACH);
    // The picker panel never appears, so every attach attempt times out.

    let raw = serde_json::json!({
        "title": "Soupe",
        "ingredientGroups": [{"categoryLabel": "Base", "items": [{"name": "eau"}]}],
        "steps": [
            {"title": "Verser", "description": "Verser l'eau",
             "stepIngredients": ["eau", "sel"]},
            {"title": "Chauffer", "description": "Porter à ébullition"}
        ]
    })
    .to_string();

    let outcome = filler(&fake).run(&raw).await.unwrap();
    assert_eq!(outcome, RunOutcome::StepsFilled, "timeouts stay contained");

    let actions = fake.actions();
    let attach_key = FakeSurface::key(selectors::ACTIVE_STEP_ATTACH);
    assert_eq!(
        count_clicks(&actions, &attach_key),
        2,
        "both ingredients attempted despite the first timeout"
    );
    assert_eq!(count_keys(&actions, "Enter"), 1, "second step still processed");
}

#[tokio::test(start_paused = true)]
async fn time_panel_writes_only_nonzero_components() {
    init_tracing();
    let fake = Arc::new(FakeSurface::new(SETTINGS_URL));
    fake.add(selectors::TIME_TILE);
    fake.add(selectors::PREP_HOURS_INPUT);
    fake.add(selectors::PREP_MINUTES_INPUT);
    fake.add(selectors::TOTAL_HOURS_INPUT);
    fake.add(selectors::TOTAL_MINUTES_INPUT);

    // prep 125 -> 2 h 5 min; total 45 -> hours untouched, 45 min
    let outcome = filler(&fake).run(&sample_recipe()).await.unwrap();
    assert_eq!(outcome, RunOutcome::SettingsFilled);

    let actions = fake.actions();
    assert!(has_set_text(&actions, &FakeSurface::key(selectors::PREP_HOURS_INPUT), "2"));
    assert!(has_set_text(&actions, &FakeSurface::key(selectors::PREP_MINUTES_INPUT), "5"));
    assert!(
        !ever_touched(&actions, &FakeSurface::key(selectors::TOTAL_HOURS_INPUT)),
        "zero hour component is skipped, not written"
    );
    assert!(has_set_text(&actions, &FakeSurface::key(selectors::TOTAL_MINUTES_INPUT), "45"));
}

#[tokio::test(start_paused = true)]
async fn unknown_view_reports_navigation_needed() {
    init_tracing();
    let fake = Arc::new(FakeSurface::new(
        "https://recipes.example/created-recipes/fr-FR/R4F7K2",
    ));
    let panel = Arc::new(FakePanel::default());
    let filler = RecipeFiller::new(Surface::new(fake.clone()), panel.clone())
        .with_delays(Delays::none());

    let outcome = filler.run(&sample_recipe()).await.unwrap();
    assert_eq!(outcome, RunOutcome::NavigateFirst);
    assert_eq!(fake.actions().len(), 0, "no filling on an unknown view");

    let statuses = panel.statuses.lock().unwrap();
    assert!(statuses.last().unwrap().contains("Navigate"));
}

#[tokio::test(start_paused = true)]
async fn unrecognized_page_aborts_with_operator_message() {
    init_tracing();
    let fake = Arc::new(FakeSurface::new("https://recipes.example/search?q=soupe"));
    let panel = Arc::new(FakePanel::default());
    let filler = RecipeFiller::new(Surface::new(fake.clone()), panel.clone())
        .with_delays(Delays::none());

    let err = filler.run(&sample_recipe()).await.unwrap_err();
    assert!(matches!(err, AutomationError::PageNotRecognized(_)));

    let busy = panel.busy.lock().unwrap();
    assert_eq!(*busy, vec![true, false], "operator input re-enabled after failure");
    let statuses = panel.statuses.lock().unwrap();
    assert!(statuses.last().unwrap().starts_with("Error:"));
}
