pub mod data;
pub mod finals;
pub mod gallery;
pub mod ranking;
pub mod schedule;
pub mod score;
pub mod scoresheet;
pub mod standings;
pub mod storage;

use data::{fetch_layout, MatchRow, Table, TeamId, TournamentLayout};
use finals::FinishOrder;
use gallery::PhotoGallery;
use log::warn;
use ranking::RankingOrder;
use scoresheet::{Recomputed, Scoresheet};
use storage::{
    align_scoresheet, apply_player_names, load_match_data, load_player_names, save_match_data,
    save_player_names,
};
use wasm_bindgen::prelude::wasm_bindgen;
use wasm_bindgen_futures::spawn_local;
use web_sys::{window, HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;
use yew::TargetCast;

#[derive(Clone, Copy, PartialEq)]
enum Tab {
    Matches,
    Results,
    Finals,
    Photos,
}

impl Tab {
    const ALL: [Tab; 4] = [Tab::Matches, Tab::Results, Tab::Finals, Tab::Photos];

    fn label(self) -> &'static str {
        match self {
            Tab::Matches => "Matches",
            Tab::Results => "Results",
            Tab::Finals => "Finals",
            Tab::Photos => "Photos",
        }
    }
}

#[derive(Clone)]
enum Field {
    Time(String),
    Court(String),
    TeamA(TeamId),
    TeamB(TeamId),
    PlayerA(String),
    PlayerB(String),
    Score(String),
}

#[derive(Clone)]
struct RowEdit {
    table: Table,
    index: usize,
    field: Field,
}

impl Field {
    fn apply(self, row: &mut MatchRow) {
        match self {
            Field::Time(value) => row.time = value,
            Field::Court(value) => row.court = value,
            Field::TeamA(team) => row.team_a = team,
            Field::TeamB(team) => row.team_b = team,
            Field::PlayerA(value) => row.player_a = Some(value),
            Field::PlayerB(value) => row.player_b = Some(value),
            Field::Score(value) => row.score = value,
        }
    }

    fn is_player(&self) -> bool {
        matches!(self, Field::PlayerA(_) | Field::PlayerB(_))
    }
}

pub(crate) fn alert(message: &str) {
    if let Some(window) = window() {
        let _ = window.alert_with_message(message);
    }
}

/// Runs the full pass, persists the rows and publishes the new state.
fn commit(
    mut sheet: Scoresheet,
    sheet_handle: &UseStateHandle<Option<Scoresheet>>,
    results_handle: &UseStateHandle<Option<Recomputed>>,
    names_changed: bool,
) {
    let results = sheet.recompute();
    if results.singles_seeded || names_changed {
        save_player_names(&sheet.singles);
    }
    save_match_data(&sheet);
    results_handle.set(Some(results));
    sheet_handle.set(Some(sheet));
}

#[function_component(App)]
fn app() -> Html {
    let sheet = use_state(|| None::<Scoresheet>);
    let results = use_state(|| None::<Recomputed>);
    let finish_order = use_state(|| None::<FinishOrder>);
    let active_tab = use_state(|| Tab::Matches);

    {
        let sheet = sheet.clone();
        let results = results.clone();
        let finish_order = finish_order.clone();

        use_effect_with_deps(
            move |_| {
                spawn_local(async move {
                    let layout = match fetch_layout().await {
                        Ok(layout) => layout,
                        Err(err) => {
                            warn!("Using built-in tournament layout: {}", err);
                            TournamentLayout::builtin()
                        }
                    };

                    let mut loaded = Scoresheet::from_layout(layout);
                    if let Some(saved) = load_match_data() {
                        align_scoresheet(&mut loaded, saved);
                    }
                    apply_player_names(&mut loaded.singles, &load_player_names());

                    if loaded.finals_locked {
                        finish_order.set(loaded.refresh_finals());
                    }
                    commit(loaded, &sheet, &results, false);
                });

                || ()
            },
            (),
        );
    }

    let on_edit = {
        let sheet = sheet.clone();
        let results = results.clone();
        let finish_order = finish_order.clone();

        Callback::from(move |edit: RowEdit| {
            let Some(mut next) = (*sheet).clone() else {
                return;
            };
            let Some(row) = next.rows_mut(edit.table).get_mut(edit.index) else {
                return;
            };

            let finals_score = edit.table == Table::Finals && matches!(edit.field, Field::Score(_));
            let names_changed = edit.field.is_player();
            edit.field.apply(row);

            if finals_score {
                if let Some(order) = next.refresh_finals() {
                    finish_order.set(Some(order));
                }
                save_match_data(&next);
                sheet.set(Some(next));
            } else {
                commit(next, &sheet, &results, names_changed);
            }
        })
    };

    let on_add_row = {
        let sheet = sheet.clone();
        let results = results.clone();

        Callback::from(move |table: Table| {
            let Some(mut next) = (*sheet).clone() else {
                return;
            };
            if next.add_row(table) {
                commit(next, &sheet, &results, false);
            }
        })
    };

    let on_update_finals = {
        let sheet = sheet.clone();
        let results = results.clone();
        let finish_order = finish_order.clone();

        Callback::from(move |_: MouseEvent| {
            let Some(mut next) = (*sheet).clone() else {
                return;
            };
            let current = next.recompute();
            if let Err(err) = next.lock_finals(&current.overall_ranking) {
                alert(&err.to_string());
                return;
            }
            finish_order.set(next.refresh_finals());
            commit(next, &sheet, &results, false);
        })
    };

    let tabs = Tab::ALL.iter().map(|tab| {
        let tab = *tab;
        let active_tab = active_tab.clone();
        let class = classes!("tab-btn", (*active_tab == tab).then_some("active"));
        let onclick = Callback::from(move |_: MouseEvent| active_tab.set(tab));
        html! { <button class={class} onclick={onclick}>{ tab.label() }</button> }
    });

    let content = match ((*sheet).as_ref(), (*results).as_ref()) {
        (Some(sheet), Some(results)) => match *active_tab {
            Tab::Matches => html! {
                <>
                    { render_match_section("Doubles", Table::Doubles, sheet, &on_edit, &on_add_row) }
                    { render_match_section("Singles", Table::Singles, sheet, &on_edit, &on_add_row) }
                </>
            },
            Tab::Results => render_results(results, &finish_order),
            Tab::Finals => render_finals(sheet, results, &finish_order, &on_edit, on_update_finals),
            Tab::Photos => html! { <PhotoGallery /> },
        },
        _ => html! { <p>{ "Loading scoresheet…" }</p> },
    };

    html! {
        <div class="app-container">
            <h1>{ "Tennis Tournament Scoresheet" }</h1>
            <nav class="tabs">{ for tabs }</nav>
            <main class="tab-content active">{ content }</main>
        </div>
    }
}

fn render_match_section(
    title: &str,
    table: Table,
    sheet: &Scoresheet,
    on_edit: &Callback<RowEdit>,
    on_add_row: &Callback<Table>,
) -> Html {
    let add_click = {
        let on_add_row = on_add_row.clone();
        Callback::from(move |_: MouseEvent| on_add_row.emit(table))
    };

    html! {
        <section class="match-section">
            <h2>{ title }</h2>
            { render_match_table(table, sheet.rows(table), true, on_edit) }
            <button class="add-row" onclick={add_click}>{ "Add match" }</button>
        </section>
    }
}

fn render_match_table(
    table: Table,
    rows: &[MatchRow],
    scores_enabled: bool,
    on_edit: &Callback<RowEdit>,
) -> Html {
    let has_matchup = table != Table::Doubles;
    let has_players = table == Table::Singles;

    html! {
        <table class="match-table">
            <thead>
                <tr>
                    <th>{ "Time" }</th>
                    <th>{ "Court" }</th>
                    if has_matchup { <th>{ "Matchup" }</th> }
                    <th>{ "Team A" }</th>
                    if has_players { <th>{ "Player A" }</th> }
                    <th>{ "Team B" }</th>
                    if has_players { <th>{ "Player B" }</th> }
                    <th>{ "Score" }</th>
                    <th>{ "Winner" }</th>
                </tr>
            </thead>
            <tbody>
                { for rows.iter().enumerate().map(|(index, row)| {
                    render_match_row(table, index, row, scores_enabled, on_edit)
                }) }
            </tbody>
        </table>
    }
}

fn render_match_row(
    table: Table,
    index: usize,
    row: &MatchRow,
    score_enabled: bool,
    on_edit: &Callback<RowEdit>,
) -> Html {
    let text_input = |value: &str, placeholder: &'static str, make: fn(String) -> Field| {
        let on_edit = on_edit.clone();
        let oninput = Callback::from(move |event: InputEvent| {
            let input: HtmlInputElement = event.target_unchecked_into();
            on_edit.emit(RowEdit {
                table,
                index,
                field: make(input.value()),
            });
        });
        html! { <input type="text" value={value.to_string()} placeholder={placeholder} oninput={oninput} /> }
    };

    let team_cell = |current: TeamId, make: fn(TeamId) -> Field| {
        if table == Table::Finals {
            return html! { <td class="team">{ current.label() }</td> };
        }
        let on_edit = on_edit.clone();
        let onchange = Callback::from(move |event: Event| {
            let select: HtmlSelectElement = event.target_unchecked_into();
            if let Ok(team) = TeamId::try_from(select.value()) {
                on_edit.emit(RowEdit {
                    table,
                    index,
                    field: make(team),
                });
            }
        });
        html! {
            <td>
                <select class="team-select" onchange={onchange}>
                    { for TeamId::all().map(|team| html! {
                        <option value={team.to_string()} selected={team == current}>{ team.label() }</option>
                    }) }
                </select>
            </td>
        }
    };

    let player_cell = |name: &Option<String>, make: fn(String) -> Field| match name {
        Some(name) => html! { <td>{ text_input(name.as_str(), "Player name", make) }</td> },
        None => html! {},
    };

    let score_input = {
        let on_edit = on_edit.clone();
        let oninput = Callback::from(move |event: InputEvent| {
            let input: HtmlInputElement = event.target_unchecked_into();
            on_edit.emit(RowEdit {
                table,
                index,
                field: Field::Score(input.value()),
            });
        });
        html! {
            <input type="text" class="score-input" placeholder="e.g. 6:0"
                value={row.score.clone()} disabled={!score_enabled} oninput={oninput} />
        }
    };

    html! {
        <tr>
            <td>{ text_input(row.time.as_str(), "Time", Field::Time) }</td>
            <td>{ text_input(row.court.as_str(), "Court", Field::Court) }</td>
            if let Some(matchup) = &row.matchup {
                <td class="matchup-description">{ matchup.clone() }</td>
            }
            { team_cell(row.team_a, Field::TeamA) }
            { player_cell(&row.player_a, Field::PlayerA) }
            { team_cell(row.team_b, Field::TeamB) }
            { player_cell(&row.player_b, Field::PlayerB) }
            <td>{ score_input }</td>
            <td class="winner-cell">{ row.winner.clone() }</td>
        </tr>
    }
}

fn render_results(results: &Recomputed, finish_order: &UseStateHandle<Option<FinishOrder>>) -> Html {
    let rows = results.standings.iter().map(|(team, result)| {
        let doubles_rank = results.doubles_ranking.rank_of(team).unwrap_or_default();
        let final_rank = results.overall_ranking.rank_of(team).unwrap_or_default();
        html! {
            <tr>
                <td>{ team.label() }</td>
                <td>{ result.doubles_points.to_string() }</td>
                <td>{ result.singles_points.to_string() }</td>
                <td>{ result.total_points.to_string() }</td>
                <td>{ result.doubles_diff.to_string() }</td>
                <td>{ result.singles_diff.to_string() }</td>
                <td>{ result.total_diff.to_string() }</td>
                <td>{ doubles_rank.to_string() }</td>
                <td>{ final_rank.to_string() }</td>
            </tr>
        }
    });

    html! {
        <>
            <table class="summary-table">
                <thead>
                    <tr>
                        <th>{ "Team" }</th>
                        <th>{ "Doubles pts" }</th>
                        <th>{ "Singles pts" }</th>
                        <th>{ "Total pts" }</th>
                        <th>{ "Doubles diff" }</th>
                        <th>{ "Singles diff" }</th>
                        <th>{ "Final diff" }</th>
                        <th>{ "Doubles rank" }</th>
                        <th>{ "Final rank" }</th>
                    </tr>
                </thead>
                <tbody>{ for rows }</tbody>
            </table>
            <div class="rankings">
                <div>
                    <h3>{ "Doubles Ranking" }</h3>
                    { render_ranking_list(&results.doubles_ranking) }
                </div>
                <div>
                    <h3>{ "Final Ranking" }</h3>
                    { render_final_ranking(&results.overall_ranking, finish_order) }
                </div>
            </div>
        </>
    }
}

fn render_ranking_list(order: &RankingOrder) -> Html {
    html! {
        <ol class="ranking-list">
            { for order.teams().iter().map(|team| html! { <li>{ team.label() }</li> }) }
        </ol>
    }
}

/// Finals finish order once resolved, otherwise the overall ranking.
fn render_final_ranking(
    overall: &RankingOrder,
    finish_order: &UseStateHandle<Option<FinishOrder>>,
) -> Html {
    let Some(order) = (**finish_order).as_ref() else {
        return render_ranking_list(overall);
    };

    html! {
        <ol class="ranking-list final-ranking">
            { for order.teams().iter().enumerate().map(|(index, team)| match index {
                0 => html! { <li class="champion">{ format!("{} (Champion)", team.label()) }</li> },
                1 => html! { <li class="runner-up">{ format!("{} (Runner-up)", team.label()) }</li> },
                _ => html! { <li>{ team.label() }</li> },
            }) }
        </ol>
    }
}

fn render_finals(
    sheet: &Scoresheet,
    results: &Recomputed,
    finish_order: &UseStateHandle<Option<FinishOrder>>,
    on_edit: &Callback<RowEdit>,
    on_update_finals: Callback<MouseEvent>,
) -> Html {
    html! {
        <section class="finals">
            <h2>{ "Finals" }</h2>
            { render_match_table(Table::Finals, &sheet.finals, sheet.finals_locked, on_edit) }
            <button class="update-finals" disabled={!results.finals_ready} onclick={on_update_finals}>
                { "Update finals" }
            </button>
            <h3>{ "Final Ranking" }</h3>
            { render_final_ranking(&results.overall_ranking, finish_order) }
        </section>
    }
}

#[wasm_bindgen(start)]
pub fn run_app() {
    wasm_logger::init(wasm_logger::Config::default());
    yew::Renderer::<App>::new().render();
}
