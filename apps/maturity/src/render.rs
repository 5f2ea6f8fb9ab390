//! HTML dashboard rendering
//!
//! Renders a [`DashboardSnapshot`] as a self-contained page with embedded CSS
//! and inline SVG charts. Controls are plain GET forms, so every dashboard
//! state is a shareable URL and the page works without JavaScript (a one-line
//! `onchange` submit is the only script).

use maturity_core::compositor::{
    DashboardRequest, DashboardSnapshot, DetailView, HeatmapCell, HeatmapView, RadarProfile,
};
use maturity_core::engine::{COLORSCALE, GapEntry, GovernanceAdjustment, MaturityLabel};
use maturity_core::evidence::{KeyFinding, SOURCE_ATTRIBUTION};
use maturity_core::{Category, SummaryStatistics, Year};
use std::f64::consts::PI;
use std::str::FromStr;

/// Public repository of the source assessment.
pub const REPOSITORY_URL: &str = "https://github.com/RubyJane88/genai-security-maturity-explorer";

// =============================================================================
// THEME
// =============================================================================

/// Color theme of the page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

/// Colors for one theme.
struct Palette {
    background: &'static str,
    surface: &'static str,
    text: &'static str,
    muted: &'static str,
    grid: &'static str,
}

impl Theme {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }

    const fn palette(self) -> Palette {
        match self {
            Theme::Dark => Palette {
                background: "#1a1a2e",
                surface: "#232342",
                text: "#ffffff",
                muted: "#a0a0b8",
                grid: "#444444",
            },
            Theme::Light => Palette {
                background: "#ffffff",
                surface: "#f5f5f7",
                text: "#000000",
                muted: "#6b7280",
                grid: "#cccccc",
            },
        }
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dark" => Ok(Theme::Dark),
            "light" => Ok(Theme::Light),
            other => Err(format!("unknown theme: {other} (expected dark or light)")),
        }
    }
}

// =============================================================================
// LINKS
// =============================================================================

/// Builds dashboard URLs that preserve the current control state.
struct Links<'a> {
    request: &'a DashboardRequest,
    theme: Theme,
}

impl Links<'_> {
    /// URL of the dashboard with the detail view for `detail` open (or
    /// closed when `None`). Already HTML-escaped.
    fn href(&self, detail: Option<Category>) -> String {
        let mut url = format!(
            "/?year={}&adjustment={}&category={}&theme={}",
            self.request.year,
            self.request.adjustment,
            self.request.radar_category.slug(),
            self.theme.as_str(),
        );
        if let Some(category) = detail {
            url.push_str("&detail=");
            url.push_str(category.slug());
        }
        html_escape(&url)
    }
}

// =============================================================================
// PAGE
// =============================================================================

/// Render the full dashboard page.
pub fn render_dashboard(
    snapshot: &DashboardSnapshot,
    request: &DashboardRequest,
    theme: Theme,
) -> String {
    let links = Links { request, theme };
    let palette = theme.palette();

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <meta name="description" content="Interactive dashboard for GenAI security maturity assessment based on {attribution}">
    <meta property="og:title" content="GenAI Security Maturity Explorer">
    <meta property="og:description" content="A sociotechnical three-dimensional maturity assessment of generative AI security risks">
    <title>GenAI Security Maturity Explorer | {attribution}</title>
    <style>:root {{ --bg: {bg}; --surface: {surface}; --text: {text}; --muted: {muted}; --grid: {grid}; }}{css}</style>
</head>
<body class="theme-{theme}">
    <div class="container">
        {header}
        <div class="layout">
            <aside>{sidebar}</aside>
            <main>
                {heatmap}
                <div class="analysis">
                    {gaps}
                    {radar}
                </div>
                {findings}
            </main>
        </div>
        {footer}
    </div>
    {detail}
</body>
</html>"#,
        attribution = html_escape(SOURCE_ATTRIBUTION),
        bg = palette.background,
        surface = palette.surface,
        text = palette.text,
        muted = palette.muted,
        grid = palette.grid,
        css = inline_css(),
        theme = theme.as_str(),
        header = render_header(),
        sidebar = render_sidebar(&snapshot.summary, request, theme),
        heatmap = render_heatmap(&snapshot.heatmap, &links),
        gaps = render_gap_chart(&snapshot.gaps, &palette),
        radar = render_radar(&snapshot.radar, request, theme, &palette),
        findings = render_key_findings(snapshot.key_findings),
        footer = render_footer(),
        detail = snapshot
            .detail
            .as_ref()
            .map(|d| render_detail_modal(d, &links))
            .unwrap_or_default(),
    )
}

fn inline_css() -> &'static str {
    r#"
* { box-sizing: border-box; margin: 0; padding: 0; }
body { font-family: Inter, system-ui, -apple-system, 'Segoe UI', sans-serif; background: var(--bg); color: var(--text); line-height: 1.5; }
a { color: inherit; }
.container { max-width: 1400px; margin: 0 auto; padding: 0 1.5rem; }
header { padding: 1.5rem 0; border-bottom: 1px solid var(--grid); }
header h1 { font-size: 2rem; font-weight: 600; }
header h2 { font-size: 1.1rem; font-weight: 300; color: var(--muted); }
header p, .muted { color: var(--muted); font-size: 0.85rem; }
.layout { display: grid; grid-template-columns: 300px 1fr; gap: 1.5rem; padding: 1.5rem 0; }
.card { background: var(--surface); border: 1px solid var(--grid); border-radius: 0.5rem; margin-bottom: 1.5rem; }
.card h3 { font-size: 0.95rem; padding: 0.75rem 1rem; border-bottom: 1px solid var(--grid); }
.card .body { padding: 1rem; }
aside label { display: block; font-weight: 600; margin: 0.75rem 0 0.4rem; }
aside select, aside input[type=range] { width: 100%; }
select { padding: 0.35rem; border-radius: 0.3rem; border: 1px solid var(--grid); background: var(--bg); color: var(--text); }
.ticks { display: flex; justify-content: space-between; font-size: 0.75rem; font-weight: 600; }
.stat { display: flex; justify-content: space-between; font-size: 0.85rem; margin-bottom: 0.25rem; }
.stat .value { font-weight: 700; }
.stat.total { border-top: 1px solid var(--grid); padding-top: 0.4rem; margin-top: 0.4rem; font-size: 1rem; }
.text-danger { color: #d73027; } .text-warning { color: #fc8d59; } .text-info { color: #4fb3d9; } .text-success { color: #1a9850; }
aside ul { padding-left: 1.1rem; font-size: 0.8rem; color: var(--muted); }
table.heatmap { width: 100%; border-collapse: separate; border-spacing: 3px; }
table.heatmap th { font-size: 0.8rem; font-weight: 600; padding: 0.4rem; }
table.heatmap th.row { text-align: right; white-space: nowrap; }
table.heatmap td.cell { text-align: center; height: 70px; border-radius: 0.25rem; }
table.heatmap td.cell a { display: block; color: #000000; font-size: 1.1rem; font-weight: 600; text-decoration: none; }
table.heatmap td.cell small { display: block; color: #222222; font-size: 0.7rem; }
.subtitle { text-align: center; font-size: 0.8rem; color: var(--muted); margin-bottom: 0.5rem; }
.colorbar { height: 12px; border-radius: 6px; margin-top: 1rem; }
.colorbar-ticks { display: flex; justify-content: space-between; font-size: 0.7rem; color: var(--muted); }
.analysis { display: grid; grid-template-columns: 7fr 5fr; gap: 1.5rem; }
svg text { fill: var(--text); font-family: Inter, sans-serif; }
.findings { display: grid; grid-template-columns: repeat(4, 1fr); text-align: center; }
.findings div { padding: 1rem; }
.findings .value { font-size: 2.2rem; font-weight: 700; }
footer { border-top: 1px solid var(--grid); padding: 1rem 0 2rem; text-align: center; font-size: 0.8rem; color: var(--muted); }
.overlay { position: fixed; inset: 0; background: rgba(0, 0, 0, 0.6); overflow-y: auto; padding: 2rem; }
.modal { max-width: 1100px; margin: 0 auto; background: var(--bg); border: 1px solid var(--grid); border-radius: 0.5rem; }
.modal .head, .modal .foot { display: flex; justify-content: space-between; align-items: center; padding: 1rem 1.5rem; border-bottom: 1px solid var(--grid); }
.modal .foot { border-top: 1px solid var(--grid); border-bottom: none; }
.modal .content { padding: 1.5rem; }
.alert { background: rgba(79, 179, 217, 0.15); border-left: 4px solid #4fb3d9; padding: 0.75rem 1rem; margin-bottom: 1rem; }
blockquote { border-left: 4px solid #6f42c1; padding: 0.75rem 1rem; font-style: italic; margin-bottom: 1.5rem; }
blockquote cite { display: block; text-align: right; font-size: 0.8rem; color: var(--muted); }
.cards { display: grid; grid-template-columns: 1fr 1fr; gap: 1rem; margin: 1rem 0 1.5rem; }
.badge { float: right; font-size: 0.75rem; padding: 0.1rem 0.5rem; border-radius: 0.3rem; color: #000000; }
.badge.danger { background: #d73027; } .badge.warning { background: #fc8d59; } .badge.info { background: #4fb3d9; } .badge.success { background: #1a9850; }
.tone-danger { background: rgba(215, 48, 39, 0.1); } .tone-warning { background: rgba(252, 141, 89, 0.1); }
.tone-info { background: rgba(79, 179, 217, 0.1); } .tone-success { background: rgba(26, 152, 80, 0.1); }
.cards ul, .incidents { padding-left: 1.1rem; font-size: 0.85rem; margin: 0.5rem 0; }
.button { padding: 0.4rem 0.9rem; border-radius: 0.3rem; background: #6c757d; color: #ffffff; text-decoration: none; }
@media (max-width: 900px) {
    .layout, .analysis, .cards { grid-template-columns: 1fr; }
    .findings { grid-template-columns: 1fr 1fr; }
}
"#
}

fn render_header() -> String {
    format!(
        r#"<header>
    <h1>&#128737; Generative AI Security Maturity Explorer</h1>
    <h2>A Sociotechnical Three-Dimensional Maturity Assessment</h2>
    <p>Based on <em>'Security Risks in Generative AI'</em> by Ruby Jane {attribution}</p>
</header>"#,
        attribution = html_escape(SOURCE_ATTRIBUTION),
    )
}

// =============================================================================
// SIDEBAR
// =============================================================================

fn render_sidebar(summary: &SummaryStatistics, request: &DashboardRequest, theme: Theme) -> String {
    let year_options: String = Year::ALL
        .into_iter()
        .map(|y| {
            format!(
                r#"<option value="{y}"{selected}>{label}</option>"#,
                selected = selected(y == request.year),
                label = y.label(),
            )
        })
        .collect();

    let ticks: String = GovernanceAdjustment::all()
        .map(|a| {
            let [r, g, b] = COLORSCALE[a.level() as usize];
            format!(r#"<span style="color: #{r:02x}{g:02x}{b:02x}">{a}</span>"#)
        })
        .collect();

    let theme_options: String = [Theme::Dark, Theme::Light]
        .into_iter()
        .map(|t| {
            format!(
                r#"<option value="{value}"{selected}>{name}</option>"#,
                value = t.as_str(),
                selected = selected(t == theme),
                name = if t == Theme::Dark { "Dark Mode" } else { "Light Mode" },
            )
        })
        .collect();

    format!(
        r#"<div class="card">
    <h3>Controls</h3>
    <div class="body">
        <form method="get" action="/" onchange="this.submit()">
            <input type="hidden" name="category" value="{radar}">
            <label for="year">Assessment Year</label>
            <select id="year" name="year">{year_options}</select>
            <label for="adjustment">What-If Simulation</label>
            <p class="muted">Simulate governance improvement:</p>
            <input id="adjustment" type="range" name="adjustment" min="0" max="{max}" step="1" value="{adjustment}">
            <div class="ticks">{ticks}</div>
            <p class="muted"><em>&#8593; Watch protection cells turn greener as governance improves</em></p>
            <label for="theme">Theme</label>
            <select id="theme" name="theme">{theme_options}</select>
            <noscript><p><button type="submit">Apply</button></p></noscript>
        </form>
        <label>Quick Statistics</label>
        {stats}
        <label>How to Use</label>
        <ul>
            <li>Hover over cells for evidence</li>
            <li>Click threats for detailed analysis</li>
            <li>Use slider to simulate improvements</li>
        </ul>
    </div>
</div>"#,
        radar = request.radar_category.slug(),
        max = GovernanceAdjustment::MAX,
        adjustment = request.adjustment,
        stats = render_quick_stats(summary),
    )
}

fn render_quick_stats(summary: &SummaryStatistics) -> String {
    let rows = [
        ("Threat Maturity", summary.avg_threat, "text-danger"),
        ("Technical Controls", summary.avg_technical, "text-warning"),
        ("Governance", summary.avg_governance, "text-info"),
        ("Stakeholder Protection", summary.avg_stakeholder, "text-success"),
    ];
    let mut html = String::new();
    for (name, value, class) in rows {
        html.push_str(&format!(
            r#"<div class="stat"><span class="muted">{name}:</span><span class="value {class}">{value:.1}</span></div>"#
        ));
    }
    html.push_str(&format!(
        r#"<div class="stat total"><span class="muted">Overall Gap:</span><span class="value text-danger">{:.1}</span></div>"#,
        summary.overall_gap
    ));
    html
}

fn selected(is_selected: bool) -> &'static str {
    if is_selected { " selected" } else { "" }
}

// =============================================================================
// HEATMAP
// =============================================================================

fn render_heatmap(view: &HeatmapView, links: &Links<'_>) -> String {
    let header: String = view
        .dimensions
        .iter()
        .map(|d| format!("<th>{}</th>", html_escape(d.name())))
        .collect();

    let mut rows = String::new();
    for row in &view.rows {
        let href = links.href(Some(row.category));
        rows.push_str(&format!(
            r#"<tr><th class="row"><a href="{href}">{name}</a></th>"#,
            name = html_escape(row.category.name()),
        ));
        for cell in &row.cells {
            rows.push_str(&format!(
                r#"<td class="cell" style="background: {color}" title="{hover}"><a href="{href}">{score:.1}</a><small>{label}</small></td>"#,
                color = cell.color,
                hover = html_escape(&hover_text(row.category, cell)),
                score = cell.score,
                label = html_escape(cell.label.name()),
            ));
        }
        rows.push_str("</tr>");
    }

    let gradient: Vec<String> = COLORSCALE
        .iter()
        .enumerate()
        .map(|(i, [r, g, b])| format!("#{r:02x}{g:02x}{b:02x} {}%", i * 25))
        .collect();
    let ticks: String = MaturityLabel::ALL
        .iter()
        .map(|l| format!("<span>{} - {}</span>", l.ordinal(), l.short_name()))
        .collect();

    format!(
        r#"<div class="card">
    <h3>Maturity Assessment Heatmap <span class="muted">&#8212; Click on any threat category for detailed analysis</span></h3>
    <div class="body">
        <p class="subtitle"><strong>Maturity Levels Across Threats and Dimensions (0-4 Scale)</strong><br>{year_label}</p>
        <table class="heatmap">
            <thead><tr><th></th>{header}</tr></thead>
            <tbody>{rows}</tbody>
        </table>
        <div class="colorbar" style="background: linear-gradient(to right, {gradient})"></div>
        <div class="colorbar-ticks">{ticks}</div>
    </div>
</div>"#,
        year_label = html_escape(&view.year_label),
        gradient = gradient.join(", "),
    )
}

/// Plain-text hover for a heatmap cell (rendered as a `title` attribute).
fn hover_text(category: Category, cell: &HeatmapCell) -> String {
    let mut text = format!(
        "{category}\n{dimension}\n\nLevel {score:.1}: {label}",
        dimension = cell.dimension,
        score = cell.score,
        label = cell.label,
    );
    for line in cell.evidence {
        text.push_str("\n\u{2022} ");
        text.push_str(line);
    }
    if !cell.references.is_empty() {
        text.push_str("\n\nReferences: ");
        text.push_str(&cell.references.join(", "));
    }
    text
}

// =============================================================================
// GAP CHART
// =============================================================================

const GAP_WIDTH: f64 = 560.0;
const GAP_HEIGHT: f64 = 320.0;
const GAP_MARGIN_LEFT: f64 = 55.0;
const GAP_MARGIN_RIGHT: f64 = 20.0;
const GAP_MARGIN_TOP: f64 = 30.0;
const GAP_MARGIN_BOTTOM: f64 = 50.0;

fn render_gap_chart(gaps: &[GapEntry], palette: &Palette) -> String {
    let plot_w = GAP_WIDTH - GAP_MARGIN_LEFT - GAP_MARGIN_RIGHT;
    let plot_h = GAP_HEIGHT - GAP_MARGIN_TOP - GAP_MARGIN_BOTTOM;
    let y_of = |v: f64| GAP_MARGIN_TOP + plot_h * (1.0 - v.clamp(0.0, 4.0) / 4.0);

    let mut svg = String::new();
    for level in 0..=4 {
        let y = y_of(f64::from(level));
        svg.push_str(&format!(
            r#"<line x1="{x1}" y1="{y:.1}" x2="{x2}" y2="{y:.1}" stroke="{grid}" stroke-width="0.5"/><text x="{tx}" y="{ty:.1}" font-size="11" text-anchor="end">{level}</text>"#,
            x1 = GAP_MARGIN_LEFT,
            x2 = GAP_WIDTH - GAP_MARGIN_RIGHT,
            grid = palette.grid,
            tx = GAP_MARGIN_LEFT - 8.0,
            ty = y + 4.0,
        ));
    }

    let band = plot_w / gaps.len().max(1) as f64;
    for (i, entry) in gaps.iter().enumerate() {
        let x = GAP_MARGIN_LEFT + band * i as f64 + band * 0.15;
        let width = band * 0.7;
        let top = y_of(entry.gap);
        let height = y_of(0.0) - top;
        svg.push_str(&format!(
            r#"<g><title>{name}&#10;Threat Level: {threat:.1}&#10;Avg Protection: {protection:.1}&#10;Gap: {gap:.1}</title><rect x="{x:.1}" y="{top:.1}" width="{width:.1}" height="{height:.1}" fill="{color}"/><text x="{cx:.1}" y="{vy:.1}" font-size="14" text-anchor="middle">{gap:.1}</text><text x="{cx:.1}" y="{ly:.1}" font-size="11" text-anchor="middle">{name}</text></g>"#,
            name = html_escape(entry.category.name()),
            threat = entry.threat_level,
            protection = entry.average_protection,
            gap = entry.gap,
            color = entry.severity.color(),
            cx = x + width / 2.0,
            vy = top - 6.0,
            ly = y_of(0.0) + 20.0,
        ));
    }

    format!(
        r#"<div class="card">
    <h3>Protection Gap Analysis</h3>
    <div class="body">
        <p class="subtitle"><strong>Protection Gap Analysis</strong><br>Threat Maturity &#8722; Average Protection Score</p>
        <svg viewBox="0 0 {w} {h}" width="100%" role="img" aria-label="Protection gap by threat category">
            <text x="14" y="{mid:.1}" font-size="12" text-anchor="middle" transform="rotate(-90 14 {mid:.1})">Gap Size (Levels)</text>
            {svg}
        </svg>
    </div>
</div>"#,
        w = GAP_WIDTH,
        h = GAP_HEIGHT,
        mid = GAP_MARGIN_TOP + plot_h / 2.0,
    )
}

// =============================================================================
// RADAR
// =============================================================================

const RADAR_WIDTH: f64 = 460.0;
const RADAR_HEIGHT: f64 = 300.0;
const RADAR_RADIUS: f64 = 105.0;

/// Position of a score on spoke `index` of `spokes`, starting at the top and
/// going clockwise.
fn radar_point(score: f64, index: usize, spokes: usize) -> (f64, f64) {
    let angle = -PI / 2.0 + 2.0 * PI * index as f64 / spokes as f64;
    let r = RADAR_RADIUS * score.clamp(0.0, 4.0) / 4.0;
    (
        RADAR_WIDTH / 2.0 + r * angle.cos(),
        RADAR_HEIGHT / 2.0 + r * angle.sin(),
    )
}

fn polygon_points(scores: impl Iterator<Item = f64>, spokes: usize) -> String {
    scores
        .enumerate()
        .map(|(i, s)| {
            let (x, y) = radar_point(s, i, spokes);
            format!("{x:.1},{y:.1}")
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn render_radar(
    radar: &RadarProfile,
    request: &DashboardRequest,
    theme: Theme,
    palette: &Palette,
) -> String {
    let spokes = radar.points.len().max(1);
    let mut svg = String::new();

    for level in 1..=4 {
        let ring = polygon_points(std::iter::repeat_n(f64::from(level), spokes), spokes);
        svg.push_str(&format!(
            r#"<polygon points="{ring}" fill="none" stroke="{grid}" stroke-width="0.7"/>"#,
            grid = palette.grid,
        ));
    }
    for (i, point) in radar.points.iter().enumerate() {
        let (x, y) = radar_point(4.0, i, spokes);
        let (lx, ly) = radar_point(4.0 + 0.7, i, spokes);
        let anchor = if (lx - RADAR_WIDTH / 2.0).abs() < 1.0 {
            "middle"
        } else if lx > RADAR_WIDTH / 2.0 {
            "start"
        } else {
            "end"
        };
        svg.push_str(&format!(
            r#"<line x1="{cx}" y1="{cy}" x2="{x:.1}" y2="{y:.1}" stroke="{grid}" stroke-width="0.7"/><text x="{lx:.1}" y="{ty:.1}" font-size="10" text-anchor="{anchor}">{name}</text>"#,
            cx = RADAR_WIDTH / 2.0,
            cy = RADAR_HEIGHT / 2.0,
            grid = palette.grid,
            ty = ly + 4.0,
            name = html_escape(point.dimension.name()),
        ));
    }

    let reference = polygon_points(
        std::iter::repeat_n(radar.reference_level, spokes),
        spokes,
    );
    let profile = polygon_points(radar.points.iter().map(|p| p.score), spokes);
    svg.push_str(&format!(
        r##"<polygon points="{reference}" fill="none" stroke="{muted}" stroke-dasharray="3,3"/><polygon points="{profile}" fill="rgba(26, 152, 80, 0.25)" stroke="#1a9850" stroke-width="2"/>"##,
        muted = palette.muted,
    ));
    for (i, point) in radar.points.iter().enumerate() {
        let (x, y) = radar_point(point.score, i, spokes);
        svg.push_str(&format!(
            r##"<circle cx="{x:.1}" cy="{y:.1}" r="4" fill="#1a9850"><title>{name}&#10;Level: {score:.1}</title></circle>"##,
            name = html_escape(point.dimension.name()),
            score = point.score,
        ));
    }

    let options: String = Category::ALL
        .into_iter()
        .map(|c| {
            format!(
                r#"<option value="{slug}"{selected}>{name}</option>"#,
                slug = c.slug(),
                selected = selected(c == radar.category),
                name = html_escape(c.name()),
            )
        })
        .collect();

    format!(
        r#"<div class="card">
    <h3>Threat Profile</h3>
    <div class="body">
        <form method="get" action="/" onchange="this.submit()">
            <input type="hidden" name="year" value="{year}">
            <input type="hidden" name="adjustment" value="{adjustment}">
            <input type="hidden" name="theme" value="{theme}">
            <select name="category">{options}</select>
            <noscript><button type="submit">Show</button></noscript>
        </form>
        <svg viewBox="0 0 {w} {h}" width="100%" role="img" aria-label="{name} profile">
            <text x="{cx}" y="16" font-size="14" font-weight="bold" text-anchor="middle">{name}</text>
            {svg}
        </svg>
    </div>
</div>"#,
        year = request.year,
        adjustment = request.adjustment,
        theme = theme.as_str(),
        w = RADAR_WIDTH,
        h = RADAR_HEIGHT,
        cx = RADAR_WIDTH / 2.0,
        name = html_escape(radar.category.name()),
    )
}

// =============================================================================
// FINDINGS, DETAIL, FOOTER
// =============================================================================

fn render_key_findings(findings: &[KeyFinding]) -> String {
    let items: String = findings
        .iter()
        .map(|f| {
            format!(
                r#"<div><div class="value text-{tone}">{value}</div><strong>{title}</strong><br><small class="muted">{caption}</small></div>"#,
                tone = f.tone,
                value = html_escape(f.value),
                title = html_escape(f.title),
                caption = html_escape(f.caption),
            )
        })
        .collect();

    format!(
        r#"<div class="card">
    <h3>Key Findings from {attribution}</h3>
    <div class="findings">{items}</div>
</div>"#,
        attribution = html_escape(SOURCE_ATTRIBUTION),
    )
}

fn render_detail_modal(detail: &DetailView, links: &Links<'_>) -> String {
    let cards: String = detail
        .dimensions
        .iter()
        .map(|card| {
            let evidence: String = card
                .evidence
                .iter()
                .map(|e| format!("<li>{}</li>", html_escape(e)))
                .collect();
            format!(
                r#"<div class="card tone-{tone}">
    <h3>{dimension}<span class="badge {tone}">Level {level:.1}</span></h3>
    <div class="body">
        <p>{description}</p>
        <ul>{evidence}</ul>
        <small class="muted">&#128214; {references}</small>
    </div>
</div>"#,
                tone = card.tone.as_str(),
                dimension = html_escape(card.dimension.name()),
                level = card.level,
                description = html_escape(card.description),
                references = html_escape(&card.references.join(", ")),
            )
        })
        .collect();

    let incidents: String = detail
        .incidents
        .iter()
        .map(|i| format!("<li>&#9889; {}</li>", html_escape(i)))
        .collect();

    format!(
        r#"<div class="overlay" role="dialog" aria-modal="true" aria-labelledby="detail-title">
    <div class="modal">
        <div class="head">
            <h2 id="detail-title">&#128737; {name}</h2>
            <a class="button" href="{close}" aria-label="Close">&#10005;</a>
        </div>
        <div class="content">
            <div class="alert">{description}</div>
            <blockquote>{quote}<cite>&#8212; {attribution}</cite></blockquote>
            <h3>Dimension Analysis</h3>
            <div class="cards">{cards}</div>
            <h3>Real-World Incidents</h3>
            <ul class="incidents">{incidents}</ul>
        </div>
        <div class="foot">
            <small class="muted">Data from {attribution} systematic literature review</small>
            <a class="button" href="{close}">Close</a>
        </div>
    </div>
</div>"#,
        name = html_escape(detail.category.name()),
        close = links.href(None),
        description = html_escape(detail.description),
        quote = html_escape(detail.thesis_quote),
        attribution = html_escape(detail.attribution),
    )
}

fn render_footer() -> String {
    format!(
        r#"<footer>
    <p>&#169; 2025 Ruby Jane Cabagnot | <a href="{repo}" target="_blank" rel="noopener">GitHub Repository</a> | Based on systematic review of 46 sources</p>
    <p><strong>Maturity Scale:</strong> 0=Non-existent, 1=Initial, 2=Developing, 3=Defined, 4=Mature</p>
</footer>"#,
        repo = REPOSITORY_URL,
    )
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
