use std::time::Duration;

use chrono::{Datelike, Days, Local, Month, Months, NaiveDate};
use leptos::prelude::*;
use wasm_bindgen::{JsCast, UnwrapThrowExt};
use web_sys::FocusEvent;

pub(crate) fn now_date() -> NaiveDate {
    Local::now().date_naive()
}

/// The 6x7 grid of days shown for the month of `show_date`, starting on
/// the Sunday at or before the 1st.
pub(crate) fn calendar_cells(show_date: NaiveDate) -> Vec<NaiveDate> {
    let first = show_date.with_day(1).unwrap_or(show_date);
    let lead = first.weekday().num_days_from_sunday() as u64;
    let start = first - Days::new(lead);
    (0..42).map(|i| start + Days::new(i)).collect()
}

/// Calendar input bound to an optional date. With `disable_past`, days
/// before today are inert and typed past dates are rejected; clearing
/// leaves the value absent.
#[component]
pub fn Datepicker(
    value: RwSignal<Option<NaiveDate>>,
    #[prop(optional)] disable_past: bool,
) -> impl IntoView {
    let is_show_panel = RwSignal::new(false);
    let show_date = RwSignal::new(value.get_untracked().unwrap_or(now_date()));

    let show_date_text = RwSignal::new(String::new());
    let show_date_format = "%Y-%m-%d";

    let update_show_date_text = move || {
        value.with_untracked(move |date| {
            let text = date.as_ref().map_or(String::new(), |date| {
                date.format(show_date_format).to_string()
            });
            show_date_text.set(text);
        });
    };
    update_show_date_text();

    let open_panel = move |_| {
        show_date.set(value.get_untracked().unwrap_or(now_date()));
        is_show_panel.set(true);
    };

    let clear_input = Callback::new(move |()| {
        value.set(None);
        show_date_text.set(String::new());
        is_show_panel.set(false);
    });

    let close_panel = Callback::new(move |date: Option<NaiveDate>| {
        if let Some(date) = date {
            if !(disable_past && date < now_date()) && value.get_untracked() != Some(date) {
                value.set(Some(date));
            }
        }
        update_show_date_text();
        is_show_panel.set(false);
    });

    let on_input_blur = Callback::new(move |_| {
        match NaiveDate::parse_from_str(&show_date_text.get_untracked(), show_date_format) {
            Ok(date) if !(disable_past && date < now_date()) => {
                if value.get_untracked() != Some(date) {
                    value.set(Some(date));
                }
                update_show_date_text();
            }
            _ => update_show_date_text(),
        }
    });

    let on_focusout = move |e: FocusEvent| {
        let node = e
            .current_target()
            .unwrap_throw()
            .unchecked_into::<web_sys::HtmlElement>();

        set_timeout(
            move || {
                let has_focus = if let Some(active) = document().active_element() {
                    let active: web_sys::Node = active.into();
                    node.contains(Some(&active))
                } else {
                    false
                };
                if !has_focus && is_show_panel.get_untracked() {
                    close_panel.run(None);
                }
            },
            Duration::from_millis(0),
        );
    };

    view! {
        <div class="relative max-w-48"
            on:focusout=on_focusout
        >
            <div class="absolute inset-y-0 start-0 flex items-center ps-3 pointer-events-none">
                <svg class="w-4 h-4 text-gray-500" aria-hidden="true" xmlns="http://www.w3.org/2000/svg" fill="currentColor" viewBox="0 0 20 20">
                    <path d="M20 4a2 2 0 0 0-2-2h-2V1a1 1 0 0 0-2 0v1h-3V1a1 1 0 0 0-2 0v1H6V1a1 1 0 0 0-2 0v1H2a2 2 0 0 0-2 2v2h20V4ZM0 18a2 2 0 0 0 2 2h16a2 2 0 0 0 2-2V8H0v10Zm5-8h10a1 1 0 0 1 0 2H5a1 1 0 0 1 0-2Z"></path>
                </svg>
            </div>
            <input type="text" class="bg-gray-50 border border-gray-300 text-gray-900 text-sm rounded-lg focus:ring-blue-500 focus:border-blue-500 block w-full ps-10 p-2.5" placeholder="Select date"
                prop:value=move || show_date_text.get()
                on:input=move |e| show_date_text.set(event_target_value(&e))
                on:focus=open_panel
                on:blur=move |e| on_input_blur.run(e)
            />
            <div
                class="absolute top-12 z-20"
                class:hidden=move || !is_show_panel.get()
            >
                <DatePanel value show_date disable_past close_panel clear_input />
            </div>
        </div>
    }
}

#[component]
fn DatePanel(
    value: RwSignal<Option<NaiveDate>>,
    show_date: RwSignal<NaiveDate>,
    disable_past: bool,
    close_panel: Callback<Option<NaiveDate>>,
    clear_input: Callback<()>,
) -> impl IntoView {
    let dates = Memo::new(move |_| calendar_cells(show_date.get()));

    let previous_month = move |_| {
        show_date.update(|date| {
            *date = *date - Months::new(1);
        });
    };

    let next_month = move |_| {
        show_date.update(|date| {
            *date = *date + Months::new(1);
        });
    };

    let pick_today = move |_| {
        close_panel.run(Some(now_date()));
    };

    view! {
        <div class="inline-block rounded-lg bg-white shadow-lg p-4">
            <div class="flex justify-between mb-2">
                <button
                    type="button" class="bg-white rounded-lg text-gray-500 hover:bg-gray-100 hover:text-gray-900 text-lg p-2.5 focus:outline-none focus:ring-2 focus:ring-gray-200"
                    on:click=previous_month
                >
                    <svg class="w-4 h-4 rtl:rotate-180 text-gray-800" aria-hidden="true" xmlns="http://www.w3.org/2000/svg" fill="none" viewBox="0 0 14 10"><path stroke="currentColor" stroke-linecap="round" stroke-linejoin="round" stroke-width="2" d="M13 5H1m0 0 4 4M1 5l4-4"></path></svg>
                </button>
                <span class="text-sm rounded-lg text-gray-900 bg-white font-semibold py-2.5 px-5">
                    {move || format!("{} {}", Month::try_from(show_date.get().month() as u8).map(|m| m.name()).unwrap_or(""), show_date.get().year())}
                </span>
                <button
                    type="button" class="bg-white rounded-lg text-gray-500 hover:bg-gray-100 hover:text-gray-900 text-lg p-2.5 focus:outline-none focus:ring-2 focus:ring-gray-200"
                    on:click=next_month
                >
                    <svg class="w-4 h-4 rtl:rotate-180 text-gray-800" aria-hidden="true" xmlns="http://www.w3.org/2000/svg" fill="none" viewBox="0 0 14 10"><path stroke="currentColor" stroke-linecap="round" stroke-linejoin="round" stroke-width="2" d="M1 5h12m0 0L9 1m4 4L9 9"></path></svg>
                </button>
            </div>
            <div class="p-1">
                <div class="grid grid-cols-7 mb-1 text-sm font-medium text-gray-900">
                    <span class="text-center h-6 leading-6">"Su"</span>
                    <span class="text-center h-6 leading-6">"Mo"</span>
                    <span class="text-center h-6 leading-6">"Tu"</span>
                    <span class="text-center h-6 leading-6">"We"</span>
                    <span class="text-center h-6 leading-6">"Th"</span>
                    <span class="text-center h-6 leading-6">"Fr"</span>
                    <span class="text-center h-6 leading-6">"Sa"</span>
                </div>
                <div class="w-64 grid grid-cols-7">
                    {move || {
                        let month = show_date.get().month();
                        dates
                            .get()
                            .into_iter()
                            .map(|date| {
                                view! { <DatePanelItem value date month disable_past close_panel /> }
                            })
                            .collect_view()
                    }}
                </div>
            </div>
            <div class="flex space-x-2 rtl:space-x-reverse mt-2">
                <button type="button" class="text-white bg-blue-700 hover:bg-blue-800 focus:ring-4 focus:ring-blue-300 font-medium rounded-lg text-sm px-5 py-2 text-center w-1/2"
                    on:click=pick_today
                >
                    Today
                </button>
                <button type="button" class="text-gray-900 bg-white border border-gray-300 hover:bg-gray-100 focus:ring-4 focus:ring-blue-300 font-medium rounded-lg text-sm px-5 py-2 text-center w-1/2"
                    on:click=move |_| clear_input.run(())
                >
                    Clear
                </button>
            </div>
        </div>
    }
}

#[component]
fn DatePanelItem(
    value: RwSignal<Option<NaiveDate>>,
    date: NaiveDate,
    month: u32,
    disable_past: bool,
    close_panel: Callback<Option<NaiveDate>>,
) -> impl IntoView {
    let disabled = disable_past && date < now_date();
    let other_month = date.month() != month;
    let is_selected = Memo::new(move |_| value.with(|value_date| *value_date == Some(date)));

    let on_click = move |_| {
        if disabled {
            return;
        }
        close_panel.run(Some(date));
    };
    view! {
        <button
            class="block flex-1 leading-9 border-0 rounded-lg text-center font-semibold text-sm"
            class=("text-gray-300", disabled)
            class=("cursor-pointer", !disabled)
            class=("text-gray-400", !disabled && other_month)
            class=("text-gray-900", !disabled && !other_month)
            class=("bg-blue-700", move || is_selected.get())
            class=("text-white", move || is_selected.get())
            class=("hover:bg-gray-100", move || !disabled && !is_selected.get())
            on:click=on_click
        >
            {date.day()}
        </button>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Weekday;

    #[test]
    fn calendar_grid_is_six_weeks_starting_sunday() {
        let cells = calendar_cells(NaiveDate::from_ymd_opt(2026, 8, 15).unwrap());
        assert_eq!(cells.len(), 42);
        assert_eq!(cells[0].weekday(), Weekday::Sun);
        // August 2026 starts on a Saturday, so the grid leads with July days
        assert_eq!(cells[0], NaiveDate::from_ymd_opt(2026, 7, 26).unwrap());
        assert!(cells.contains(&NaiveDate::from_ymd_opt(2026, 8, 1).unwrap()));
        assert!(cells.contains(&NaiveDate::from_ymd_opt(2026, 8, 31).unwrap()));
    }

    #[test]
    fn calendar_grid_covers_months_starting_sunday() {
        let cells = calendar_cells(NaiveDate::from_ymd_opt(2026, 3, 10).unwrap());
        // March 2026 starts on a Sunday, no leading cells
        assert_eq!(cells[0], NaiveDate::from_ymd_opt(2026, 3, 1).unwrap());
        assert_eq!(cells[41], NaiveDate::from_ymd_opt(2026, 4, 11).unwrap());
    }
}
