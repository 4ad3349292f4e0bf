use shared::{TimeField, Weekday, WeeklySchedule};
use yew::prelude::*;

use super::form_message::input_value;

#[derive(Properties, PartialEq)]
pub struct ScheduleEditorProps {
    /// Owned by the parent form; every change comes back through `on_change`
    pub value: WeeklySchedule,
    pub on_change: Callback<WeeklySchedule>,
    #[prop_or_default]
    pub disabled: bool,
}

#[derive(Debug, Clone, PartialEq)]
struct DayRow {
    day: Weekday,
    enabled: bool,
    start_time: String,
    end_time: String,
}

/// One row per weekday, Monday first
fn day_rows(schedule: &WeeklySchedule) -> Vec<DayRow> {
    Weekday::ALL
        .iter()
        .map(|&day| {
            let range = schedule.get(day);
            DayRow {
                day,
                enabled: range.is_some(),
                start_time: range.map(|r| r.field(TimeField::Start).to_string()).unwrap_or_default(),
                end_time: range.map(|r| r.field(TimeField::End).to_string()).unwrap_or_default(),
            }
        })
        .collect()
}

/// Weekly on/off toggles with a start and end time for each enabled day
#[function_component(ScheduleEditor)]
pub fn schedule_editor(props: &ScheduleEditorProps) -> Html {
    let rows = day_rows(&props.value);

    html! {
        <fieldset class="schedule-editor" disabled={props.disabled}>
            <legend>{"Schedule"}</legend>
            {for rows.into_iter().map(|row| {
                let day = row.day;

                let on_toggle = {
                    let value = props.value.clone();
                    let on_change = props.on_change.clone();
                    Callback::from(move |_: Event| on_change.emit(value.toggle_day(day)))
                };

                let time_input = |field: TimeField| {
                    let value = props.value.clone();
                    let on_change = props.on_change.clone();
                    Callback::from(move |e: InputEvent| {
                        on_change.emit(value.set_time(day, field, input_value(&e)));
                    })
                };

                html! {
                    <div class={classes!("schedule-day", row.enabled.then_some("enabled"))} key={day.as_str()}>
                        <label class="schedule-day-toggle">
                            <input type="checkbox" checked={row.enabled} onchange={on_toggle} />
                            {day.label()}
                        </label>
                        {if row.enabled {
                            html! {
                                <div class="schedule-day-times">
                                    <input
                                        type="time"
                                        aria-label={format!("{} start", day.label())}
                                        value={row.start_time.clone()}
                                        oninput={time_input(TimeField::Start)}
                                    />
                                    <span class="schedule-separator">{"to"}</span>
                                    <input
                                        type="time"
                                        aria-label={format!("{} end", day.label())}
                                        value={row.end_time.clone()}
                                        oninput={time_input(TimeField::End)}
                                    />
                                </div>
                            }
                        } else { html! {} }}
                    </div>
                }
            })}
        </fieldset>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rows_cover_every_day_in_order() {
        let schedule = WeeklySchedule::new()
            .toggle_day(Weekday::Friday)
            .set_time(Weekday::Friday, TimeField::End, "18:30");

        let rows = day_rows(&schedule);

        assert_eq!(rows.len(), 7);
        assert_eq!(rows[0].day, Weekday::Monday);
        assert!(!rows[0].enabled);
        assert_eq!(rows[0].start_time, "");

        let friday = &rows[4];
        assert_eq!(friday.day, Weekday::Friday);
        assert!(friday.enabled);
        assert_eq!(friday.start_time, "09:00");
        assert_eq!(friday.end_time, "18:30");
    }

    #[test]
    fn test_rows_follow_parent_value() {
        let before = WeeklySchedule::new().toggle_day(Weekday::Sunday);
        let after = before.toggle_day(Weekday::Sunday);

        assert!(day_rows(&before)[6].enabled);
        assert!(!day_rows(&after)[6].enabled);
        assert!(day_rows(&before)[6].enabled);
    }
}
