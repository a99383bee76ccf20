//! Brochure Demo - A marketing brochure rendered as a scrolling terminal page.
//!
//! Demonstrates the full pipeline: a content column with named anchors, a
//! scroll-linked progress bar, spring-smooth anchor navigation, and three
//! stat counters that count up the first time they scroll into view.
//!
//! Keys:
//! - Up/Down, PageUp/PageDown, Home/End - scroll
//! - 1-6 - glide to a section
//! - q / Esc - quit
//!
//! Run with: cargo run --example brochure

use std::io::{self, Write};
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use crossterm::{cursor, execute, queue, style, terminal};

use inview_tui::{
    CounterHandle, CounterProps, LINE_SCROLL, Margin, Rect, ScrollAnimation, create_progress_derived,
    detect_viewport, page_down, page_up, pump, register_anchor, scroll_by, scroll_offset,
    scroll_to_bottom, scroll_to_top, set_content_height, set_viewport_size, smooth_scroll_to_anchor,
    start_observers, view_counter, viewport_height, viewport_width,
};

const FPS: u8 = 30;

/// Sections of the page, in nav order.
const SECTIONS: [(&str, &str); 6] = [
    ("home", "首页"),
    ("about", "关于颀阔"),
    ("model", "业务模式"),
    ("sectors", "重点领域"),
    ("tech", "核心技术"),
    ("team", "管理团队"),
];

const PARTNERS: [&str; 7] = [
    "上汽集团",
    "尚颀资本",
    "瑞能新动力",
    "风泉资本",
    "晶科能源",
    "首正创信",
    "中国城市公共交通协会",
];

const TEAM: [(&str, &str); 4] = [
    ("周鹏", "执行董事"),
    ("邹海", "总经理"),
    ("桂仑", "副总经理"),
    ("席诚悦", "总经理助理"),
];

/// One row of the content column.
enum Line {
    Text(String),
    /// Stat row: rendered live from the counter with that index.
    Stat { index: usize, label: &'static str },
}

/// Stat definitions: target, suffix, label.
const STATS: [(i64, &str, &str); 3] = [
    (443, "亿+", "尚颀资本管理规模"),
    (200, "+", "投资产业链优质企业"),
    (3, "倍", "资产REITs上市潜在估值提升"),
];

/// Build the content column. Returns the lines, the row of each section
/// anchor, and the row of each stat counter.
fn build_page() -> (Vec<Line>, Vec<u16>, Vec<u16>) {
    let mut lines: Vec<Line> = Vec::new();
    let mut anchor_rows: Vec<u16> = Vec::new();
    let mut stat_rows: Vec<u16> = Vec::new();

    let mut heading = |lines: &mut Vec<Line>, title: &str| {
        anchor_rows.push(lines.len() as u16);
        lines.push(Line::Text(format!("== {title} ==")));
        lines.push(Line::Text(String::new()));
    };

    heading(&mut lines, "颀阔投资");
    lines.push(Line::Text("产融结合，数字赋能".to_string()));
    lines.push(Line::Text(
        "专注于基础设施与新能源领域的 Pre-REITs 基金管理人".to_string(),
    ));
    for _ in 0..6 {
        lines.push(Line::Text(String::new()));
    }

    heading(&mut lines, "关于颀阔");
    lines.push(Line::Text(
        "依托产业股东背景，构建覆盖募、投、管、退的完整闭环。".to_string(),
    ));
    lines.push(Line::Text(String::new()));
    for (index, (_, _, label)) in STATS.iter().enumerate() {
        stat_rows.push(lines.len() as u16);
        lines.push(Line::Stat { index, label });
        lines.push(Line::Text(String::new()));
    }
    for _ in 0..4 {
        lines.push(Line::Text(String::new()));
    }

    heading(&mut lines, "业务模式");
    lines.push(Line::Text(
        "Pre-REITs 基金 + ABS 的业务闭环：收购、培育、证券化退出。".to_string(),
    ));
    for _ in 0..6 {
        lines.push(Line::Text(String::new()));
    }

    heading(&mut lines, "重点领域");
    lines.push(Line::Text(
        "新能源电站 · 停车设施 · 产业园区 · 公共交通".to_string(),
    ));
    for _ in 0..6 {
        lines.push(Line::Text(String::new()));
    }

    heading(&mut lines, "核心技术");
    lines.push(Line::Text(
        "新能源与停车资产数据服务系统，底层资产透明化管理。".to_string(),
    ));
    for _ in 0..6 {
        lines.push(Line::Text(String::new()));
    }

    heading(&mut lines, "管理团队");
    for (name, role) in TEAM {
        lines.push(Line::Text(format!("{name}  {role}")));
    }
    lines.push(Line::Text(String::new()));
    lines.push(Line::Text(format!("合作伙伴: {}", PARTNERS.join(" · "))));
    for _ in 0..4 {
        lines.push(Line::Text(String::new()));
    }

    (lines, anchor_rows, stat_rows)
}

fn render(
    out: &mut impl Write,
    lines: &[Line],
    counters: &[CounterHandle],
    progress: f64,
) -> io::Result<()> {
    let width = viewport_width() as usize;
    let height = viewport_height();
    let offset = scroll_offset() as usize;

    queue!(out, cursor::MoveTo(0, 0))?;

    // Scroll-linked progress bar across the top row.
    let filled = (progress * width as f64).round() as usize;
    let bar: String = (0..width).map(|i| if i < filled { '━' } else { '─' }).collect();
    queue!(
        out,
        terminal::Clear(terminal::ClearType::CurrentLine),
        style::Print(&bar),
        style::Print("\r\n")
    )?;

    // Content rows below the bar.
    for row in 0..height.saturating_sub(1) {
        let text = match lines.get(offset + row as usize) {
            Some(Line::Text(text)) => text.clone(),
            Some(Line::Stat { index, label }) => {
                format!("  {:>8}  {label}", counters[*index].text())
            }
            None => String::new(),
        };
        queue!(
            out,
            terminal::Clear(terminal::ClearType::CurrentLine),
            style::Print(&text),
            style::Print("\r\n")
        )?;
    }

    out.flush()
}

fn main() -> io::Result<()> {
    let (lines, anchor_rows, stat_rows) = build_page();

    // Degrade path: without a detectable viewport the counters stay
    // dormant, so just print the static column and leave.
    if detect_viewport().is_err() {
        for line in &lines {
            match line {
                Line::Text(text) => println!("{text}"),
                Line::Stat { label, .. } => println!("  {:>8}  {label}", 0),
            }
        }
        return Ok(());
    }

    set_content_height(lines.len() as u16);

    let mut anchor_cleanups = Vec::new();
    for ((name, _), row) in SECTIONS.iter().zip(&anchor_rows) {
        anchor_cleanups.push(register_anchor(name, *row));
    }

    let counters: Vec<CounterHandle> = STATS
        .iter()
        .zip(&stat_rows)
        .map(|((value, suffix, _), row)| {
            view_counter(CounterProps {
                value: *value,
                suffix: Some((*suffix).to_string()),
                region: Rect::row(*row, 80).into(),
                margin: Margin::inset(2),
                fps: FPS,
            })
        })
        .collect();

    let observers = start_observers();
    let progress = create_progress_derived();

    terminal::enable_raw_mode()?;
    let mut out = io::stdout();
    execute!(out, terminal::EnterAlternateScreen, cursor::Hide)?;

    let mut glide: Option<ScrollAnimation> = None;
    let result = loop {
        pump(FPS);
        if let Err(err) = render(&mut out, &lines, &counters, progress.get()) {
            break Err(err);
        }

        if event::poll(Duration::from_millis(1000 / FPS as u64))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    let mut cancel_glide = true;
                    match key.code {
                        KeyCode::Char('q') | KeyCode::Esc => break Ok(()),
                        KeyCode::Up => {
                            scroll_by(-(LINE_SCROLL as i32));
                        }
                        KeyCode::Down => {
                            scroll_by(LINE_SCROLL as i32);
                        }
                        KeyCode::PageUp => {
                            page_up();
                        }
                        KeyCode::PageDown => {
                            page_down();
                        }
                        KeyCode::Home => scroll_to_top(),
                        KeyCode::End => scroll_to_bottom(),
                        KeyCode::Char(c @ '1'..='6') => {
                            let section = c as usize - '1' as usize;
                            if let Some(animation) = glide.take() {
                                animation.cancel();
                            }
                            glide = smooth_scroll_to_anchor(SECTIONS[section].0, FPS);
                            cancel_glide = false;
                        }
                        _ => cancel_glide = false,
                    }
                    // Manual scrolling interrupts an in-flight glide.
                    if cancel_glide {
                        if let Some(animation) = glide.take() {
                            animation.cancel();
                        }
                    }
                }
                Event::Resize(width, height) => set_viewport_size(width, height),
                _ => {}
            }
        }
    };

    execute!(out, cursor::Show, terminal::LeaveAlternateScreen)?;
    terminal::disable_raw_mode()?;

    drop(observers);
    for cleanup in anchor_cleanups {
        cleanup();
    }

    result
}
