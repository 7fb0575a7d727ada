use crate::billing::Invoice;
use crate::config::Config;
use crate::error::RenderError;
use crate::fonts::Font;

// US Letter, 0.75in side margins, 0.5in top and bottom margins.
pub const PAGE_WIDTH: f32 = 612.0;
pub const PAGE_HEIGHT: f32 = 792.0;
const LEFT: f32 = 54.0;
const RIGHT: f32 = PAGE_WIDTH - 54.0;
const CENTER: f32 = PAGE_WIDTH / 2.0;

const TEXT_SIZE: f32 = 10.0;
const TITLE_SIZE: f32 = 28.0;
const NOTE_SIZE: f32 = 9.0;
const FOOTER_SIZE: f32 = 8.0;
const LEADING: f32 = 14.0;
const GREY: f32 = 0.5;

// Hours, Description, Rate and Amount column edges: 0.8in, 4.0in, 1.0in
// and 1.2in wide.
const COLUMNS: [f32; 5] = [LEFT, 111.6, 399.6, 471.6, RIGHT];
const TABLE_TOP: f32 = 536.0;
const ROW_H: f32 = 20.0;
const CELL_PAD: f32 = 6.0;
const BASELINE_RISE: f32 = 6.0;
const GRID_STROKE: f32 = 0.5;

/// The table pads itself with blank rows up to this many item rows.
const MIN_ITEM_ROWS: usize = 7;

/// Most item rows that still leave the closing blocks above the bottom
/// margin, even with the optional bank name line present.
pub const MAX_ITEM_ROWS: usize = 15;

/// A typeset page: absolutely positioned text plus the strokes of the
/// table grid. `x`/`y` place the left end of the first glyph's baseline
/// in PDF user space (origin bottom left, points).
#[derive(Debug, PartialEq, Clone, Default)]
pub struct Page {
    pub texts: Vec<TextRun>,
    pub rules: Vec<Rule>,
    pub frames: Vec<Frame>,
}

#[derive(Debug, PartialEq, Clone)]
pub struct TextRun {
    pub font: Font,
    pub size: f32,
    pub x: f32,
    pub y: f32,
    pub shade: f32,
    pub text: String,
}

impl TextRun {
    fn left(
        font: Font,
        size: f32,
        x: f32,
        y: f32,
        text: impl Into<String>,
    ) -> Self {
        Self {
            font,
            size,
            x,
            y,
            shade: 0.0,
            text: text.into(),
        }
    }

    fn right(
        font: Font,
        size: f32,
        edge: f32,
        y: f32,
        text: impl Into<String>,
    ) -> Self {
        let text = text.into();
        let x = edge - font.text_width(&text, size);
        Self {
            font,
            size,
            x,
            y,
            shade: 0.0,
            text,
        }
    }

    fn centered(
        font: Font,
        size: f32,
        middle: f32,
        y: f32,
        text: impl Into<String>,
    ) -> Self {
        let text = text.into();
        let x = middle - font.text_width(&text, size) / 2.0;
        Self {
            font,
            size,
            x,
            y,
            shade: 0.0,
            text,
        }
    }

    fn grey(mut self) -> Self {
        self.shade = GREY;
        self
    }
}

#[derive(Debug, PartialEq, Clone)]
pub struct Rule {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
    pub stroke: f32,
}

#[derive(Debug, PartialEq, Clone)]
pub struct Frame {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
    pub stroke: f32,
}

/// Typesets one invoice onto the fixed single-page layout.
pub fn compose(
    config: &Config,
    invoice: &Invoice,
) -> Result<Page, RenderError> {
    if invoice.items.len() > MAX_ITEM_ROWS {
        return Err(RenderError::TooManyItems {
            count: invoice.items.len(),
            max: MAX_ITEM_ROWS,
        });
    }

    let mut page = Page::default();
    header(&mut page, config, invoice);
    bill_to(&mut page, config);
    let table_bottom = items_table(&mut page, invoice);
    closing(&mut page, config, table_bottom);
    Ok(page)
}

fn header(page: &mut Page, config: &Config, invoice: &Invoice) {
    let sender = &config.sender;
    let mut y = 746.0;
    for line in [
        &sender.name,
        &sender.address_1,
        &sender.address_2,
        &sender.email,
        &sender.phone,
    ] {
        page.texts
            .push(TextRun::left(Font::Regular, TEXT_SIZE, LEFT, y, line));
        y -= LEADING;
    }

    page.texts.push(
        TextRun::right(Font::Bold, TITLE_SIZE, RIGHT, 730.0, "INVOICE")
            .grey(),
    );

    meta_line(page, 668.0, "Date:", format!(" {}", invoice.long_date()));
    meta_line(page, 654.0, "Invoice #:", format!(" {}", invoice.number));
}

// Bold label and regular value, right-aligned as one unit.
fn meta_line(page: &mut Page, y: f32, label: &str, value: String) {
    let label_width = Font::Bold.text_width(label, TEXT_SIZE);
    let x = RIGHT - label_width - Font::Regular.text_width(&value, TEXT_SIZE);
    page.texts
        .push(TextRun::left(Font::Bold, TEXT_SIZE, x, y, label));
    page.texts.push(TextRun::left(
        Font::Regular,
        TEXT_SIZE,
        x + label_width,
        y,
        value,
    ));
}

fn bill_to(page: &mut Page, config: &Config) {
    page.texts
        .push(TextRun::left(Font::Bold, TEXT_SIZE, LEFT, 620.0, "Bill To:"));
    page.rules.push(Rule {
        x1: LEFT,
        y1: 614.0,
        x2: RIGHT,
        y2: 614.0,
        stroke: 1.0,
    });

    let client = &config.client;
    let mut y = 598.0;
    for line in [
        &client.name,
        &client.company,
        &client.address_1,
        &client.address_2,
    ] {
        page.texts
            .push(TextRun::left(Font::Regular, TEXT_SIZE, LEFT, y, line));
        y -= LEADING;
    }
}

fn baseline(row: usize) -> f32 {
    TABLE_TOP - ROW_H * (row + 1) as f32 + BASELINE_RISE
}

// Returns the y of the table's bottom edge, total row included.
fn items_table(page: &mut Page, invoice: &Invoice) -> f32 {
    let data_rows = invoice.items.len().max(MIN_ITEM_ROWS);
    let grid_bottom = TABLE_TOP - ROW_H * (data_rows + 1) as f32;

    for row in 0..=data_rows + 1 {
        let y = TABLE_TOP - ROW_H * row as f32;
        page.rules.push(Rule {
            x1: LEFT,
            y1: y,
            x2: RIGHT,
            y2: y,
            stroke: GRID_STROKE,
        });
    }
    for x in COLUMNS {
        page.rules.push(Rule {
            x1: x,
            y1: TABLE_TOP,
            x2: x,
            y2: grid_bottom,
            stroke: GRID_STROKE,
        });
    }

    let y = baseline(0);
    for (column, title) in [(0, "Hours"), (1, "Description"), (2, "Rate")] {
        page.texts.push(TextRun::left(
            Font::Bold,
            TEXT_SIZE,
            COLUMNS[column] + CELL_PAD,
            y,
            title,
        ));
    }
    page.texts.push(TextRun::right(
        Font::Bold,
        TEXT_SIZE,
        COLUMNS[4] - CELL_PAD,
        y,
        "Amount",
    ));

    for (i, item) in invoice.items.iter().enumerate() {
        let y = baseline(i + 1);
        if !item.hours.is_zero() {
            page.texts.push(TextRun::left(
                Font::Regular,
                TEXT_SIZE,
                COLUMNS[0] + CELL_PAD,
                y,
                format!("{:.1}", item.hours),
            ));
        }
        page.texts.push(TextRun::left(
            Font::Regular,
            TEXT_SIZE,
            COLUMNS[1] + CELL_PAD,
            y,
            &item.description,
        ));
        page.texts.push(TextRun::left(
            Font::Regular,
            TEXT_SIZE,
            COLUMNS[2] + CELL_PAD,
            y,
            format!("{}{:.2}", item.rate.currency(), item.rate.amount()),
        ));
        page.texts.push(TextRun::right(
            Font::Regular,
            TEXT_SIZE,
            COLUMNS[4] - CELL_PAD,
            y,
            item.amount().to_string(),
        ));
    }

    // The total row sits below the grid, boxed around its two cells.
    let y = baseline(data_rows + 1);
    page.texts.push(TextRun::left(
        Font::Bold,
        TEXT_SIZE,
        COLUMNS[2] + CELL_PAD,
        y,
        "Total",
    ));
    page.texts.push(TextRun::right(
        Font::Bold,
        TEXT_SIZE,
        COLUMNS[4] - CELL_PAD,
        y,
        invoice.total().to_string(),
    ));
    page.frames.push(Frame {
        x: COLUMNS[2],
        y: grid_bottom - ROW_H,
        w: RIGHT - COLUMNS[2],
        h: ROW_H,
        stroke: GRID_STROKE,
    });

    grid_bottom - ROW_H
}

fn closing(page: &mut Page, config: &Config, table_bottom: f32) {
    let bank = &config.bank;
    let mut lines = Vec::new();
    if let Some(name) = &bank.name {
        lines.push(format!("Bank Name: {}", name));
    }
    lines.push(format!("Account Number: {}", bank.account));
    lines.push(format!("ACH Routing Number: {}", bank.ach_routing));
    lines.push(format!("Wire Routing Number: {}", bank.wire_routing));

    let mut y = table_bottom - 21.6 - TEXT_SIZE; // 0.3in gap
    for (i, text) in lines.into_iter().enumerate() {
        if i > 0 {
            y -= LEADING;
        }
        page.texts.push(TextRun::centered(
            Font::Regular,
            TEXT_SIZE,
            CENTER,
            y,
            text,
        ));
    }

    y -= 14.4 + NOTE_SIZE; // 0.2in gap
    page.texts.push(
        TextRun::centered(
            Font::Oblique,
            NOTE_SIZE,
            CENTER,
            y,
            format!("Make all checks payable to {}", config.payee()),
        )
        .grey(),
    );

    y -= 10.8 + TEXT_SIZE; // 0.15in gap
    page.texts.push(TextRun::centered(
        Font::BoldOblique,
        TEXT_SIZE,
        CENTER,
        y,
        "Thank you for your business!",
    ));

    y -= 21.6 + FOOTER_SIZE; // 0.3in gap
    let sender = &config.sender;
    page.texts.push(TextRun::centered(
        Font::Regular,
        FOOTER_SIZE,
        CENTER,
        y,
        format!(
            "{} {}, {} Phone {} {}",
            sender.name,
            sender.address_1,
            sender.address_2,
            sender.phone,
            sender.email
        ),
    ));
}

#[cfg(test)]
mod tests {

    use super::*;
    use crate::billing::{Currency, LineItem, Money};
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    // The 0.5in bottom margin everything must stay above.
    const BOTTOM: f32 = 36.0;

    fn item(hours: Decimal, rate: Decimal) -> LineItem {
        LineItem::new(
            hours,
            "Development".to_string(),
            Money::new(Currency::Usd, rate),
        )
    }

    fn invoice(items: Vec<LineItem>) -> Invoice {
        let date = NaiveDate::from_ymd_opt(2025, 12, 2).unwrap();
        Invoice::new(date, "BYRON-", Currency::Usd, items)
    }

    fn page(items: Vec<LineItem>) -> Page {
        compose(&Config::sample(), &invoice(items)).unwrap()
    }

    fn find<'a>(page: &'a Page, text: &str) -> &'a TextRun {
        page.texts
            .iter()
            .find(|run| run.text == text)
            .unwrap_or_else(|| panic!("no text run '{}'", text))
    }

    #[test]
    fn title_is_big_grey_and_right_aligned() {
        let page = page(vec![item(dec!(200), dec!(150))]);
        let title = find(&page, "INVOICE");

        assert_eq!(title.font, Font::Bold);
        assert_eq!(title.size, TITLE_SIZE);
        assert_eq!(title.shade, GREY);
        let right_edge = title.x + Font::Bold.text_width("INVOICE", TITLE_SIZE);
        assert!((right_edge - RIGHT).abs() < 0.01);
    }

    #[test]
    fn sender_block_sits_top_left() {
        let page = page(vec![]);
        let name = find(&page, "Byron Digby");
        assert_eq!(name.x, LEFT);
        assert_eq!(name.y, 746.0);

        let phone = find(&page, "(555) 010-4477");
        assert_eq!(phone.y, 746.0 - 4.0 * LEADING);
    }

    #[test]
    fn meta_lines_right_align_label_and_value_together() {
        let page = page(vec![]);
        let label = find(&page, "Date:");
        let value = find(&page, " December 2, 2025");

        assert_eq!(label.font, Font::Bold);
        assert_eq!(value.font, Font::Regular);
        assert_eq!(label.y, value.y);
        let label_width = Font::Bold.text_width("Date:", TEXT_SIZE);
        assert!((value.x - (label.x + label_width)).abs() < 0.01);
        let right_edge =
            value.x + Font::Regular.text_width(&value.text, TEXT_SIZE);
        assert!((right_edge - RIGHT).abs() < 0.01);

        find(&page, " BYRON-2025-12-02");
    }

    #[test]
    fn short_invoices_pad_to_seven_rows_of_grid() {
        let page = page(vec![item(dec!(200), dec!(150))]);

        // header + 7 item rows means 9 horizontal and 5 vertical grid
        // lines, plus the Bill To rule.
        assert_eq!(page.rules.len(), 15);
        assert_eq!(page.frames.len(), 1);

        for row in 2..=MIN_ITEM_ROWS {
            let y = baseline(row);
            assert!(
                page.texts.iter().all(|run| (run.y - y).abs() > 0.01),
                "row {} should be blank",
                row
            );
        }
    }

    #[test]
    fn long_invoices_grow_the_grid() {
        let items = (0..12).map(|_| item(dec!(1), dec!(150))).collect();
        let page = page(items);
        // header + 12 item rows: 14 horizontals + 5 verticals + 1 rule.
        assert_eq!(page.rules.len(), 20);
    }

    #[test]
    fn hours_render_with_one_decimal() {
        let page = page(vec![item(dec!(200), dec!(150))]);
        let hours = find(&page, "200.0");
        assert_eq!(hours.x, COLUMNS[0] + CELL_PAD);
        assert_eq!(hours.y, baseline(1));
    }

    #[test]
    fn zero_hours_leave_the_cell_blank() {
        let page = page(vec![item(dec!(0), dec!(150))]);
        assert!(page.texts.iter().all(|run| run.text != "0.0"));
        find(&page, "$150.00");
    }

    #[test]
    fn rate_is_ungrouped_and_amount_is_grouped() {
        let page = page(vec![item(dec!(2), dec!(1500))]);
        let rate = find(&page, "$1500.00");
        assert_eq!(rate.x, COLUMNS[2] + CELL_PAD);

        let amount = find(&page, "$3,000.00");
        let right_edge =
            amount.x + Font::Regular.text_width(&amount.text, TEXT_SIZE);
        assert!((right_edge - (COLUMNS[4] - CELL_PAD)).abs() < 0.01);
    }

    #[test]
    fn total_row_is_bold_and_boxed() {
        let page =
            page(vec![item(dec!(100), dec!(150)), item(dec!(50), dec!(150))]);
        let label = find(&page, "Total");
        let total = find(&page, "$22,500.00");

        assert_eq!(label.font, Font::Bold);
        assert_eq!(total.font, Font::Bold);
        assert_eq!(label.y, total.y);

        let frame = &page.frames[0];
        assert_eq!(frame.x, COLUMNS[2]);
        assert!((frame.w - (RIGHT - COLUMNS[2])).abs() < 0.01);
        assert!((frame.h - ROW_H).abs() < 0.01);
        assert!((total.y - (frame.y + BASELINE_RISE)).abs() < 0.01);
    }

    #[test]
    fn bank_block_is_centered() {
        let page = page(vec![]);
        let account = find(&page, "Account Number: 000123456789");
        let middle = account.x
            + Font::Regular.text_width(&account.text, TEXT_SIZE) / 2.0;
        assert!((middle - CENTER).abs() < 0.01);

        let ach = find(&page, "ACH Routing Number: 110000012");
        assert_eq!(ach.y, account.y - LEADING);
        find(&page, "Wire Routing Number: 021000021");
    }

    #[test]
    fn bank_name_line_is_optional() {
        let mut config = Config::sample();
        assert!(page(vec![])
            .texts
            .iter()
            .all(|run| !run.text.starts_with("Bank Name:")));

        config.bank.name = Some("First National".to_string());
        let page = compose(&config, &invoice(vec![])).unwrap();
        let bank = find(&page, "Bank Name: First National");
        let account = find(&page, "Account Number: 000123456789");
        assert_eq!(account.y, bank.y - LEADING);
    }

    #[test]
    fn payable_note_is_grey_italic() {
        let page = page(vec![]);
        let note = find(&page, "Make all checks payable to Byron Digby");
        assert_eq!(note.font, Font::Oblique);
        assert_eq!(note.size, NOTE_SIZE);
        assert_eq!(note.shade, GREY);

        let thanks = find(&page, "Thank you for your business!");
        assert_eq!(thanks.font, Font::BoldOblique);
    }

    #[test]
    fn footer_joins_the_sender_details() {
        let page = page(vec![]);
        let footer = find(
            &page,
            "Byron Digby 123 Maple Ave, Springfield, IL 62704 \
             Phone (555) 010-4477 byron@example.com",
        );
        assert_eq!(footer.size, FOOTER_SIZE);
    }

    #[test]
    fn a_full_page_keeps_the_footer_above_the_margin() {
        let mut config = Config::sample();
        config.bank.name = Some("First National".to_string());
        let items =
            (0..MAX_ITEM_ROWS).map(|_| item(dec!(1), dec!(150))).collect();
        let page = compose(&config, &invoice(items)).unwrap();

        let lowest = page
            .texts
            .iter()
            .map(|run| run.y)
            .fold(f32::INFINITY, f32::min);
        assert!(lowest >= BOTTOM);
    }

    #[test]
    fn refuses_more_items_than_the_page_holds() {
        let items = (0..MAX_ITEM_ROWS + 1)
            .map(|_| item(dec!(1), dec!(150)))
            .collect();
        let error = compose(&Config::sample(), &invoice(items)).unwrap_err();
        match error {
            RenderError::TooManyItems { count, max } => {
                assert_eq!(count, 16);
                assert_eq!(max, MAX_ITEM_ROWS);
            }
            other => panic!("unexpected error: {}", other),
        }
    }
}
