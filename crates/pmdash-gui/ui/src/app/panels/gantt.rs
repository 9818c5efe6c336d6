use pmdash_core::views::gantt::{
  GanttRow,
  SELECT_PROMPT
};
use web_sys::Event;
use yew::{
  Callback,
  Html,
  html
};

use super::on_click;
use crate::app::forms::event_value;
use crate::app::handle::Ui;
use crate::app::{
  actions,
  loaders
};
use crate::components::{
  EmptyState,
  ProjectSelect
};

fn render_row(row: &GanttRow) -> Html {
  let indent =
    format!("padding-left: {}rem", row.depth as f64 * 1.5);
  let bar = row.bar.map(|bar| {
    html! {
        <div class="gantt-bar" style={format!("left: {:.2}%; width: {:.2}%", bar.left, bar.width)}
             title={format!("{} ({})", row.text, row.progress)}>
        </div>
    }
  });

  html! {
      <tr class="gantt-row" data-type={row.kind.clone()}>
          <td style={indent}>{ row.text.clone() }</td>
          <td>{ row.start.clone() }</td>
          <td>{ row.end.clone() }</td>
          <td>{ row.progress.clone() }</td>
          <td class="gantt-timeline">{ for bar }</td>
      </tr>
  }
}

pub fn render_gantt(ui: &Ui) -> Html {
  let (options, selected) = {
    let state = ui.shared.state.borrow();
    (
      state.project_options(),
      state.selected_project().map(str::to_string)
    )
  };
  let on_select = {
    let ui = ui.clone();
    Callback::from(move |event: Event| {
      actions::select_project(&ui, event_value(&event));
      loaders::load_gantt(&ui);
    })
  };

  let panels = ui.shared.panels.borrow();
  let chart = match panels.gantt.as_ref() {
    | None => html! { <EmptyState message={SELECT_PROMPT} /> },
    | Some(view) => html! {
        <div class="gantt-chart">
            <table class="data-table">
                <thead>
                    <tr>
                        <th>{ "Task" }</th>
                        <th>{ "Start" }</th>
                        <th>{ "End" }</th>
                        <th>{ "Progress" }</th>
                        <th>{ "Timeline" }</th>
                    </tr>
                </thead>
                <tbody>{ for view.rows.iter().map(render_row) }</tbody>
            </table>
            {
                for view.today.iter().map(|marker| html! {
                    <div class="gantt-today" style={format!("left: {:.2}%", marker.offset)} title={marker.title.clone()}></div>
                })
            }
        </div>
    }
  };

  html! {
      <div class="gantt">
          <div class="toolbar">
              <ProjectSelect id="ganttProjectSelect" options={options} selected={selected} onchange={on_select} />
              <button class="btn-secondary" onclick={on_click(ui, actions::critical_path)}>
                  <i class="fas fa-route"></i>{ " Critical Path" }
              </button>
          </div>
          { chart }
      </div>
  }
}
