#![windows_subsystem = "windows"]

use collatz_visualizer::*;
use eframe::egui;
use egui_plot::{Arrows, Line, Plot, PlotPoint, PlotPoints, Points, Text};
use num_bigint::BigUint;
use std::f32::consts::PI;

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([900.0, 760.0])
            .with_title("Collatz Conjecture Visualizer"),
        ..Default::default()
    };
    eframe::run_native(
        "collatz-visualizer",
        options,
        Box::new(|_cc| Ok(Box::new(VisualizerApp::default()))),
    )
}

const INTRO: &str = "The Collatz Conjecture is a conjecture in mathematics that concerns \
sequences defined as follows:\n\
  1. Start with any positive integer n.\n\
  2. Then each term is obtained from the previous term as follows:\n\
     - If the previous term is even, the next term is one half of the previous term.\n\
     - If the previous term is odd, the next term is 3 * n + 1.\n\n\
The conjecture is that no matter what value of n you start with, the sequence will always reach 1.\n\n\
Let's visualize the Collatz sequence and its tree for any given number.";

/// 1 回の描画で作られる図。ボタンを押すたびに作り直して差し替える。
enum Figure {
    Sequence(SequenceChart),
    Tree(TreeDiagram),
}

struct VisualizerApp {
    /// 入力欄の文字列。描画時に parse_start で BigUint に変換する
    number_input: String,
    config: Config,
    figure: Option<Figure>,
    error: Option<String>,
}

impl Default for VisualizerApp {
    fn default() -> Self {
        let config = Config::default();
        Self {
            number_input: config.default_start.to_string(),
            config,
            figure: None,
            error: None,
        }
    }
}

impl eframe::App for VisualizerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            ui.heading("Collatz Conjecture Visualizer");
            ui.separator();
            ui.label(egui::RichText::new("What is the Collatz Conjecture?").strong());
            ui.label(INTRO);
            ui.separator();
            ui.horizontal(|ui| {
                ui.label("Enter a number:");
                ui.add(egui::TextEdit::singleline(&mut self.number_input).desired_width(200.0));
                let n_len = self.number_input.trim().len();
                if n_len > 0 {
                    ui.colored_label(egui::Color32::GRAY, format!("({}桁)", n_len));
                }
                if ui.button("Visualize Sequence").clicked() {
                    self.render(|n, max| SequenceChart::new(n, max).map(Figure::Sequence));
                }
                if ui.button("Visualize Tree").clicked() {
                    self.render(|n, max| TreeDiagram::new(n, max).map(Figure::Tree));
                }
            });
            if let Some(ref e) = self.error {
                ui.colored_label(egui::Color32::from_rgb(220, 50, 50), e);
            }
        });

        egui::CentralPanel::default().show(ctx, |ui| match &self.figure {
            Some(Figure::Sequence(chart)) => draw_sequence(ui, chart),
            Some(Figure::Tree(diagram)) => draw_tree(ui, diagram),
            None => {}
        });
    }
}

impl VisualizerApp {
    fn render(&mut self, build: impl FnOnce(&BigUint, u64) -> Result<Figure>) {
        let max_steps = self.config.max_steps;
        match parse_start(&self.number_input).and_then(|n| build(&n, max_steps)) {
            Ok(fig) => {
                self.figure = Some(fig);
                self.error = None;
            }
            Err(e) => {
                tracing::warn!(error = %e, "render failed");
                self.figure = None;
                self.error = Some(e.to_string());
            }
        }
    }
}

fn draw_sequence(ui: &mut egui::Ui, chart: &SequenceChart) {
    ui.heading(&chart.title);
    let points = chart.points();
    let aspect = chart.size.width / chart.size.height;
    let width = ui.available_width();
    Plot::new("sequence_plot")
        .width(width)
        .height((width / aspect).min(ui.available_height()))
        .x_axis_label(chart.x_label)
        .y_axis_label(chart.y_label)
        .show_grid(chart.grid)
        // 整数の目盛りだけ表示
        .x_axis_formatter(|mark, _range| {
            if mark.value.fract() == 0.0 {
                format!("{}", mark.value as i64)
            } else {
                String::new()
            }
        })
        .show(ui, |plot_ui| {
            plot_ui.line(Line::new(PlotPoints::from(points.clone())));
            if chart.markers {
                plot_ui.points(Points::new(PlotPoints::from(points)).radius(3.0));
            }
        });
}

fn draw_tree(ui: &mut egui::Ui, diagram: &TreeDiagram) {
    ui.heading(&diagram.title);
    let [r, g, b] = diagram.node_color;
    let node_color = egui::Color32::from_rgb(r, g, b);
    // 面積 node_size (pt^2) の円の半径
    let radius = (diagram.node_size / PI).sqrt();

    // 矢印の先端は頂点の手前で止める
    let back_off = 0.3;
    let mut origins = Vec::with_capacity(diagram.edges.len());
    let mut tips = Vec::with_capacity(diagram.edges.len());
    for edge in &diagram.edges {
        let (x0, y0) = edge.from.coords();
        let (x1, y1) = edge.to.coords();
        let len = ((x1 - x0).powi(2) + (y1 - y0).powi(2)).sqrt().max(f64::EPSILON);
        origins.push([x0 + (x1 - x0) / len * back_off, y0 + (y1 - y0) / len * back_off]);
        tips.push([x1 - (x1 - x0) / len * back_off, y1 - (y1 - y0) / len * back_off]);
    }

    let centers: Vec<[f64; 2]> = diagram
        .nodes
        .iter()
        .map(|n| {
            let (x, y) = n.coords();
            [x, y]
        })
        .collect();

    let width = ui.available_width();
    let aspect = diagram.size.width / diagram.size.height;
    Plot::new("tree_plot")
        .width(width)
        .height((width / aspect).min(ui.available_height()))
        .show_axes(false)
        .show_grid(false)
        .data_aspect(1.0)
        .show(ui, |plot_ui| {
            plot_ui.arrows(
                Arrows::new(PlotPoints::from(origins), PlotPoints::from(tips))
                    .tip_length(diagram.arrow_size)
                    .color(egui::Color32::DARK_GRAY),
            );
            plot_ui.points(
                Points::new(PlotPoints::from(centers))
                    .radius(radius)
                    .filled(true)
                    .color(node_color),
            );
            for node in &diagram.nodes {
                let (x, y) = node.coords();
                let mut label = egui::RichText::new(&node.label)
                    .size(diagram.font_size)
                    .color(egui::Color32::BLACK);
                if diagram.bold_labels {
                    label = label.strong();
                }
                plot_ui.text(Text::new(PlotPoint::new(x, y), label));
            }
        });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render_sequence(app: &mut VisualizerApp) {
        app.render(|n, max| SequenceChart::new(n, max).map(Figure::Sequence));
    }

    #[test]
    fn test_default_input_is_one() {
        let mut app = VisualizerApp::default();
        assert_eq!(app.number_input, "1");
        render_sequence(&mut app);
        match app.figure {
            Some(Figure::Sequence(ref chart)) => assert_eq!(chart.values, vec![BigUint::from(1u32)]),
            _ => panic!("sequence figure expected"),
        }
    }

    #[test]
    fn test_large_input_kept_exact() {
        // 2^53 + 1 は f64 を経由すると 2^53 に丸まる
        let mut app = VisualizerApp::default();
        app.number_input = "9007199254740993".to_string();
        render_sequence(&mut app);
        match app.figure {
            Some(Figure::Sequence(ref chart)) => {
                assert_eq!(chart.values[0], BigUint::from(9_007_199_254_740_993u64));
                assert_eq!(chart.title, "Collatz Conjecture Sequence for 9007199254740993");
            }
            _ => panic!("sequence figure expected"),
        }
        assert!(app.error.is_none());
    }

    #[test]
    fn test_invalid_input_shows_error() {
        let mut app = VisualizerApp::default();
        render_sequence(&mut app);
        assert!(app.figure.is_some());

        app.number_input = "0".to_string();
        app.render(|n, max| TreeDiagram::new(n, max).map(Figure::Tree));
        assert!(app.figure.is_none());
        assert_eq!(
            app.error.as_deref(),
            Some("invalid input: 0 (positive integer required)")
        );

        app.number_input = "12x".to_string();
        render_sequence(&mut app);
        assert_eq!(
            app.error.as_deref(),
            Some("invalid input: 12x (positive integer required)")
        );
    }
}
