use comfy_table::presets::ASCII_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use trendforge::api::GameReport;
use trendforge::config::EngineConfig;
use trendforge::signals::{Bucket, SortMode};

fn bucket_color(bucket: Option<Bucket>) -> Option<Color> {
    match bucket? {
        Bucket::Red => Some(Color::Red),
        Bucket::Yellow => Some(Color::Yellow),
        Bucket::Green => Some(Color::Green),
    }
}

fn pct_cell(pct: &str, bucket: Option<Bucket>) -> Cell {
    let cell = Cell::new(pct);
    match bucket_color(bucket) {
        Some(c) => cell.fg(c),
        None => cell,
    }
}

fn format_start(ts: Option<i64>) -> String {
    ts.and_then(|t| chrono::DateTime::from_timestamp(t, 0))
        .map(|dt| dt.format("%Y-%m-%d %H:%M UTC").to_string())
        .unwrap_or_else(|| "TBD".to_string())
}

fn matchup(r: &GameReport) -> String {
    format!("{} @ {}", r.away, r.home)
}

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

pub fn print_ranking_table(reports: &[GameReport], mode: &SortMode, config: &EngineConfig) {
    if reports.is_empty() {
        println!("No games match.");
        return;
    }

    let active = match mode {
        SortMode::Chronological => None,
        SortMode::Group(name) => Some(name.as_str()),
    };

    let mut table = new_table();
    let mut header = vec![
        Cell::new("#"),
        Cell::new("Game").add_attribute(Attribute::Bold),
        Cell::new("Start"),
    ];
    for g in &config.groups {
        let title = if g.title.is_empty() { &g.name } else { &g.title };
        let cell = Cell::new(format!("{}\n/{}", title, g.max_score()));
        header.push(if Some(g.name.as_str()) == active {
            cell.fg(Color::Cyan).add_attribute(Attribute::Bold)
        } else {
            cell
        });
    }
    header.push(Cell::new("Edge"));
    table.add_row(header);

    for i in 3..=(config.groups.len() + 3) {
        if let Some(col) = table.column_mut(i) {
            col.set_cell_alignment(CellAlignment::Right);
        }
    }

    for (pos, r) in reports.iter().enumerate() {
        let mut row = vec![
            Cell::new(pos + 1),
            Cell::new(matchup(r)).add_attribute(Attribute::Bold),
            Cell::new(format_start(r.start_time)),
        ];
        for g in &r.rankings {
            let cell = Cell::new(g.ranking.score);
            row.push(if Some(g.name.as_str()) == active {
                cell.fg(Color::Cyan)
            } else {
                cell
            });
        }
        let edge = active
            .and_then(|name| r.ranking(name))
            .map(|rk| format!("{:.1}", rk.edge))
            .unwrap_or_else(|| "-".to_string());
        row.push(Cell::new(edge));
        table.add_row(row);
    }
    println!("{}", table);
}

pub fn print_game_report(r: &GameReport) {
    println!(
        "\n{} [{}] {}",
        matchup(r),
        r.id,
        format_start(r.start_time)
    );

    let mut table = new_table();
    table.add_row(vec![
        Cell::new("Split").add_attribute(Attribute::Bold),
        Cell::new("Profile"),
        Cell::new(&r.away),
        Cell::new(&r.home),
        Cell::new("Games"),
        Cell::new("Lean").add_attribute(Attribute::Bold),
    ]);

    for s in &r.splits {
        let games = |n: Option<u32>| n.map_or("-".to_string(), |v| v.to_string());
        let games_cell = Cell::new(format!(
            "{} | {}",
            games(s.away.sample_size),
            games(s.home.sample_size)
        ));
        let lean_cell = if s.lean.tag.is_no_play() {
            Cell::new(&s.lean_label)
        } else {
            Cell::new(&s.lean_label).add_attribute(Attribute::Bold)
        };
        table.add_row(vec![
            Cell::new(&s.split),
            Cell::new(format!("{} / {}", s.profile, s.mode)),
            pct_cell(&s.away.pct, s.away.bucket),
            pct_cell(&s.home.pct, s.home.bucket),
            if s.under_sampled {
                games_cell.fg(Color::DarkGrey)
            } else {
                games_cell
            },
            lean_cell,
        ]);
    }
    println!("{}", table);

    if !r.consensus.is_empty() || !r.totals.is_empty() {
        let mut summary = new_table();
        summary.add_row(vec![
            Cell::new("Question").add_attribute(Attribute::Bold),
            Cell::new("Call").add_attribute(Attribute::Bold),
        ]);
        for c in &r.consensus {
            let title = if c.title.is_empty() { &c.name } else { &c.title };
            summary.add_row(vec![Cell::new(title), Cell::new(&c.label)]);
        }
        for t in &r.totals {
            summary.add_row(vec![
                Cell::new(format!(
                    "{} (O {} / U {} | O {} / U {})",
                    t.split, t.away_over, t.away_under, t.home_over, t.home_under
                )),
                Cell::new(&t.label),
            ]);
        }
        println!("{}", summary);
    }

    let mut scores = new_table();
    scores.add_row(vec![
        Cell::new("Group").add_attribute(Attribute::Bold),
        Cell::new("Score"),
        Cell::new("Edge"),
    ]);
    for g in &r.rankings {
        scores.add_row(vec![
            Cell::new(&g.name),
            Cell::new(format!("{} / {}", g.ranking.score, g.ranking.max_score)),
            Cell::new(format!("{:.1}", g.ranking.edge)),
        ]);
    }
    println!("{}", scores);
}
