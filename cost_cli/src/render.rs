//! Plain-text cost report for the terminal.

use cost_core::errors::CalcResult;
use cost_core::report::{keys, CostLine, CostReport, ReportRenderer};
use cost_core::translate::Translate;

/// Translation keys the renderer uses besides the report's own line keys.
#[cfg(test)]
pub const LABEL_KEYS: &[&str] = &[
    "pdf.parameters.project_name",
    "pdf.parameters.model",
    "pdf.parameters.print_duration",
    "pdf.parameters.printer",
    "pdf.parameters.material",
    "pdf.parameters.dryer",
    "pdf.parameters.electricity_rate",
    "pdf.parameters.not_used",
    "pdf.parameters.power",
    "pdf.parameters.amount",
    "pdf.parameters.for_models_singular",
    "pdf.parameters.for_models_plural",
    "pdf.costs.position",
    "pdf.costs.amount",
    "pdf.footer",
    "units.currency",
    "units.for_x_pieces",
];

#[derive(Debug, Clone, Default)]
pub struct TextReportRenderer {
    /// Footer date; no footer when `None`
    pub generated_on: Option<String>,
}

impl TextReportRenderer {
    pub fn with_date(date: impl Into<String>) -> Self {
        TextReportRenderer {
            generated_on: Some(date.into()),
        }
    }
}

fn money(amount: f64, currency: &str) -> String {
    format!("{amount:.2} {currency}")
}

fn percent(share: f64) -> String {
    format!("{share:.1}%")
}

fn cost_row(line: &CostLine, indent: &str, t: &dyn Translate, currency: &str) -> [String; 3] {
    [
        format!("{indent}{}", t.text(&line.key)),
        money(line.amount, currency),
        percent(line.share_percent),
    ]
}

fn width_of<'a>(cells: impl Iterator<Item = &'a String>) -> usize {
    cells.map(|c| c.chars().count()).max().unwrap_or(0)
}

impl ReportRenderer for TextReportRenderer {
    fn render(&self, report: &CostReport, t: &dyn Translate) -> CalcResult<Vec<u8>> {
        let inputs = &report.inputs;
        let currency = t.text("units.currency");
        let power =
            |watts: f64| t.translate("pdf.parameters.power", &[("power", format!("{watts:.0}"))]);

        let mut out = String::new();
        let title = t.text(keys::TITLE);
        out.push_str(&format!("{title}\n{}\n\n", "=".repeat(title.chars().count())));

        // Parameters
        let models_key = if inputs.model_count == 1 {
            "pdf.parameters.for_models_singular"
        } else {
            "pdf.parameters.for_models_plural"
        };
        let dryer = if inputs.dryer_enabled {
            format!("{} ({})", inputs.dryer_name, power(inputs.dryer_power_watts))
        } else {
            t.text("pdf.parameters.not_used")
        };
        let material = t.translate(
            "pdf.parameters.amount",
            &[
                ("amount", format!("{:.1}", inputs.filament_amount_grams)),
                ("price", format!("{:.2}", inputs.filament_cost_per_kg)),
                ("currency", currency.clone()),
            ],
        );

        let parameters = [
            [t.text("pdf.parameters.project_name"), inputs.project_name.clone()],
            [t.text("pdf.parameters.model"), inputs.model_name.clone()],
            [
                t.text("pdf.parameters.print_duration"),
                format!(
                    "{:.1} h, {}",
                    inputs.print_duration_hours,
                    t.translate(models_key, &[("count", inputs.model_count.to_string())])
                ),
            ],
            [
                t.text("pdf.parameters.printer"),
                format!("{} ({})", inputs.printer_name, power(inputs.printer_power_watts)),
            ],
            [t.text("pdf.parameters.material"), format!("{} ({})", inputs.filament_name, material)],
            [t.text("pdf.parameters.dryer"), dryer],
            [
                t.text("pdf.parameters.electricity_rate"),
                format!("{:.4} {currency}/kWh", inputs.electricity_cost_per_kwh),
            ],
        ];

        out.push_str(&format!("{}\n", t.text(keys::PROJECT_INFO)));
        let label_width = width_of(parameters.iter().map(|[label, _]| label));
        for [label, value] in &parameters {
            out.push_str(&format!("  {label:<label_width$}  {value}\n"));
        }

        // Costs
        let mut rows = vec![[
            t.text("pdf.costs.position"),
            t.text("pdf.costs.amount"),
            t.text(keys::PERCENTAGE_OF_TOTAL),
        ]];
        for line in &report.lines {
            rows.push(cost_row(line, "", t, &currency));
            if line.key == keys::WEAR_MAINTENANCE {
                for wear in &report.wear_lines {
                    rows.push(cost_row(wear, "  - ", t, &currency));
                }
            }
        }
        let total_share = if report.total_cost > 0.0 { 100.0 } else { 0.0 };
        let total = [
            t.text(keys::TOTAL_COSTS),
            money(report.total_cost, &currency),
            percent(total_share),
        ];
        let per_model = [
            t.text(keys::COST_PER_MODEL),
            money(report.cost_per_model, &currency),
            t.translate("units.for_x_pieces", &[("count", inputs.model_count.to_string())]),
        ];

        let all_rows = || rows.iter().chain([&total, &per_model]);
        let label_width = width_of(all_rows().map(|[label, _, _]| label));
        let amount_width = width_of(all_rows().map(|[_, amount, _]| amount));

        out.push_str(&format!("\n{}\n", t.text(keys::COST_SUMMARY)));
        for [label, amount, share] in &rows {
            out.push_str(&format!("  {label:<label_width$}  {amount:>amount_width$}  {share}\n"));
        }
        out.push_str(&format!("  {}\n", "-".repeat(label_width + 2 + amount_width)));
        for [label, amount, note] in [&total, &per_model] {
            out.push_str(&format!("  {label:<label_width$}  {amount:>amount_width$}  {note}\n"));
        }

        if let Some(date) = &self.generated_on {
            out.push_str(&format!("\n{}\n", t.translate("pdf.footer", &[("date", date.clone())])));
        }

        Ok(out.into_bytes())
    }
}
