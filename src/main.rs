use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::collections::HashMap;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use tabled::{settings::Style, Table, Tabled};
use tracing_subscriber::EnvFilter;

use ispbill::config::{
    config_dir, document_year, ensure_initialized, init_config_dir, load_clients, load_config,
    load_items, load_parties, load_providers, load_state, save_state, Config, DocumentEntry,
    DocumentKind, Party,
};
use ispbill::document::{
    build_statement, create_document, edit_document, find_document, find_document_mut,
    format_document_number, record_payment, remove_payment, resolve_document_number,
    DocumentRequest, DocumentView, StatementFilter,
};
use ispbill::error::{BillingError, Result};
use ispbill::pricing::PaymentStatus;

#[derive(Parser)]
#[command(name = "ispbill")]
#[command(version, about = "ISP billing: pro-rata bandwidth bills, sales invoices and payments", long_about = None)]
struct Cli {
    /// Path to config directory (default: XDG config dir or ~/.ispbill)
    #[arg(short = 'C', long, global = true, env = "ISPBILL_DIR")]
    config_dir: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug); RUST_LOG overrides
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize config directory with template files
    Init,

    /// List configured clients
    Clients,

    /// List configured bandwidth providers
    Providers,

    /// List catalog items
    Items,

    /// Show counters and next document numbers
    Status,

    /// Create a sales invoice for a client
    Invoice {
        /// Client identifier from clients.toml
        #[arg(short, long)]
        client: String,

        #[command(flatten)]
        lines: LineArgs,
    },

    /// Record a purchase bill from a provider
    Bill {
        /// Provider identifier from providers.toml
        #[arg(short, long)]
        provider: String,

        #[command(flatten)]
        lines: LineArgs,
    },

    /// List bills and invoices
    List {
        /// Only show one kind (invoice or bill)
        #[arg(short, long)]
        kind: Option<DocumentKind>,

        /// Number of documents to show (default: all)
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Show the line breakdown and totals of a document
    Show {
        /// Document number or index from 'list' (e.g., 1 or INV-2026-0001)
        document: String,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Replace a document's lines and recompute its totals
    Edit {
        /// Document number or index from 'list' (e.g., 1 or INV-2026-0001)
        document: String,

        /// Catalog line "item:quantity[:from:to]" (can be repeated)
        #[arg(short, long, value_name = "ITEM:QTY")]
        item: Vec<String>,

        /// Free-text line "description:rate:quantity[:from:to]" (can be repeated)
        #[arg(short, long, value_name = "DESC:RATE:QTY")]
        line: Vec<String>,

        /// New flat discount (default: keep the current one)
        #[arg(short, long)]
        discount: Option<f64>,
    },

    /// Record a payment against a document
    AddPayment {
        /// Document number or index from 'list' (e.g., 1 or INV-2026-0001)
        document: String,

        /// Payment amount
        amount: f64,

        /// Payment date, YYYY-MM-DD (default: today)
        #[arg(long)]
        date: Option<NaiveDate>,
    },

    /// Remove a payment from a document
    RemovePayment {
        /// Document number or index from 'list' (e.g., 1 or INV-2026-0001)
        document: String,

        /// 1-based index of payment to remove (default: last)
        #[arg(long)]
        index: Option<usize>,
    },

    /// Show payment history for a document
    Payments {
        /// Document number or index from 'list' (e.g., 1 or INV-2026-0001)
        document: String,
    },

    /// Print an account statement for a client or provider
    Statement {
        /// Client identifier (sales invoices)
        #[arg(short, long, conflicts_with = "provider", required_unless_present = "provider")]
        client: Option<String>,

        /// Provider identifier (purchase bills)
        #[arg(short, long)]
        provider: Option<String>,

        /// Only documents dated on or after this date (YYYY-MM-DD)
        #[arg(long)]
        from: Option<NaiveDate>,

        /// Only documents dated on or before this date (YYYY-MM-DD)
        #[arg(long)]
        to: Option<NaiveDate>,

        /// Filter by payment status (paid, partial, due)
        #[arg(long)]
        status: Option<PaymentStatus>,
    },
}

#[derive(clap::Args)]
struct LineArgs {
    /// Catalog line "item:quantity[:from:to]" (can be repeated)
    #[arg(short, long, value_name = "ITEM:QTY")]
    item: Vec<String>,

    /// Free-text line "description:rate:quantity[:from:to]" (can be repeated)
    #[arg(short, long, value_name = "DESC:RATE:QTY")]
    line: Vec<String>,

    /// Flat discount taken off the document total
    #[arg(short, long, default_value_t = 0.0)]
    discount: f64,

    /// Document date, YYYY-MM-DD (default: today)
    #[arg(long)]
    date: Option<NaiveDate>,

    /// Price the document without saving it
    #[arg(long)]
    dry_run: bool,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    // Determine config directory
    let cfg_dir = match cli.config_dir {
        Some(p) => p,
        None => config_dir()?,
    };

    if !matches!(cli.command, Commands::Init) {
        ensure_initialized(&cfg_dir)?;
    }

    match cli.command {
        Commands::Init => cmd_init(&cfg_dir),
        Commands::Clients => cmd_parties(&cfg_dir, DocumentKind::Invoice),
        Commands::Providers => cmd_parties(&cfg_dir, DocumentKind::Bill),
        Commands::Items => cmd_items(&cfg_dir),
        Commands::Status => cmd_status(&cfg_dir),
        Commands::Invoice { client, lines } => {
            cmd_create(&cfg_dir, DocumentKind::Invoice, &client, &lines)
        }
        Commands::Bill { provider, lines } => {
            cmd_create(&cfg_dir, DocumentKind::Bill, &provider, &lines)
        }
        Commands::List { kind, limit } => cmd_list(&cfg_dir, kind, limit),
        Commands::Show { document, json } => cmd_show(&cfg_dir, &document, json),
        Commands::Edit {
            document,
            item,
            line,
            discount,
        } => cmd_edit(&cfg_dir, &document, &item, &line, discount),
        Commands::AddPayment {
            document,
            amount,
            date,
        } => cmd_add_payment(&cfg_dir, &document, amount, date),
        Commands::RemovePayment { document, index } => {
            cmd_remove_payment(&cfg_dir, &document, index)
        }
        Commands::Payments { document } => cmd_payments(&cfg_dir, &document),
        Commands::Statement {
            client,
            provider,
            from,
            to,
            status,
        } => {
            let (kind, party) = match (client, provider) {
                (Some(client), _) => (DocumentKind::Invoice, client),
                (None, provider) => (DocumentKind::Bill, provider.unwrap_or_default()),
            };
            cmd_statement(&cfg_dir, kind, &party, StatementFilter { from, to, status })
        }
    }
}

/// Initialize config directory with template files
fn cmd_init(cfg_dir: &Path) -> Result<()> {
    init_config_dir(cfg_dir)?;

    println!("Initialized ispbill config at: {}", cfg_dir.display());
    println!();
    println!("Next steps:");
    println!(
        "  1. Edit your company details:  $EDITOR {}/config.toml",
        cfg_dir.display()
    );
    println!(
        "  2. Add your clients:           $EDITOR {}/clients.toml",
        cfg_dir.display()
    );
    println!(
        "  3. Add your providers:         $EDITOR {}/providers.toml",
        cfg_dir.display()
    );
    println!(
        "  4. Configure catalog items:    $EDITOR {}/items.toml",
        cfg_dir.display()
    );
    println!();
    println!("Then create your first invoice:");
    println!("  ispbill invoice --client <client-id> --item <item>:<quantity>");

    Ok(())
}

// Table row structs for tabled
#[derive(Tabled)]
struct PartyRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "NAME")]
    name: String,
    #[tabled(rename = "EMAIL")]
    email: String,
}

#[derive(Tabled)]
struct ItemRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "DESCRIPTION")]
    description: String,
    #[tabled(rename = "RATE")]
    rate: String,
    #[tabled(rename = "UNIT")]
    unit: String,
    #[tabled(rename = "VAT")]
    vat: String,
}

#[derive(Tabled)]
struct DocumentRow {
    #[tabled(rename = "#")]
    index: usize,
    #[tabled(rename = "NUMBER")]
    number: String,
    #[tabled(rename = "DATE")]
    date: String,
    #[tabled(rename = "PARTY")]
    party: String,
    #[tabled(rename = "TOTAL")]
    total: String,
    #[tabled(rename = "OUTSTANDING")]
    outstanding: String,
    #[tabled(rename = "STATUS")]
    status: String,
}

#[derive(Tabled)]
struct LineRow {
    #[tabled(rename = "#")]
    index: usize,
    #[tabled(rename = "DESCRIPTION")]
    description: String,
    #[tabled(rename = "QTY")]
    quantity: String,
    #[tabled(rename = "RATE")]
    rate: String,
    #[tabled(rename = "PERIOD")]
    period: String,
    #[tabled(rename = "AMOUNT")]
    amount: String,
    #[tabled(rename = "VAT")]
    vat: String,
    #[tabled(rename = "TOTAL")]
    total: String,
}

#[derive(Tabled)]
struct PaymentRow {
    #[tabled(rename = "#")]
    index: usize,
    #[tabled(rename = "DATE")]
    date: String,
    #[tabled(rename = "AMOUNT")]
    amount: String,
}

#[derive(Tabled)]
struct StatementTableRow {
    #[tabled(rename = "NUMBER")]
    number: String,
    #[tabled(rename = "DATE")]
    date: String,
    #[tabled(rename = "TOTAL")]
    total: String,
    #[tabled(rename = "PAID")]
    paid: String,
    #[tabled(rename = "OUTSTANDING")]
    outstanding: String,
    #[tabled(rename = "STATUS")]
    status: String,
}

/// Format a money amount with two decimal places and thousands separators
fn format_money(value: f64, currency_symbol: &str) -> String {
    let rounded = format!("{:.2}", value.abs());
    let (whole, frac) = rounded.split_once('.').unwrap_or((rounded.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    // -0.004 rounds to 0.00 and should not print a sign
    let sign = if value < 0.0 && rounded != "0.00" { "-" } else { "" };

    format!("{sign}{currency_symbol}{grouped}.{frac}")
}

fn party_label(kind: DocumentKind) -> &'static str {
    match kind {
        DocumentKind::Invoice => "Client",
        DocumentKind::Bill => "Provider",
    }
}

/// Print a document's lines, totals and settlement
fn print_document(config: &Config, entry: &DocumentEntry, parties: &HashMap<String, Party>) {
    let symbol = &config.billing.currency_symbol;
    let view = DocumentView::new(entry, config.billing.due_days);

    let party_name = parties
        .get(&entry.party)
        .map(|p| format!("{} ({})", p.name, entry.party))
        .unwrap_or_else(|| entry.party.clone());

    println!("{} {}", entry.kind.to_string().to_uppercase(), entry.number);
    println!("  {:<9} {}", format!("{}:", party_label(entry.kind)), party_name);
    println!("  Date:     {}", view.date);
    println!("  Due date: {}", view.due_date);

    let rows: Vec<LineRow> = view
        .lines
        .iter()
        .enumerate()
        .map(|(idx, priced)| LineRow {
            index: idx + 1,
            description: priced.line.description.clone(),
            quantity: format!("{} {}", priced.line.quantity, priced.line.unit),
            rate: format_money(priced.line.rate, symbol),
            period: match (priced.line.period(), priced.days) {
                (Some(period), Some(days)) => {
                    format!("{} .. {} ({}d)", period.start(), period.end(), days)
                }
                _ => "-".to_string(),
            },
            amount: format_money(priced.price.amount, symbol),
            vat: format!(
                "{} ({}%)",
                format_money(priced.price.vat_amount, symbol),
                priced.line.vat_percent
            ),
            total: format_money(priced.price.total, symbol),
        })
        .collect();

    let table = Table::new(rows).with(Style::rounded()).to_string();
    println!("{table}");

    let settlement = view.settlement;
    println!("  Subtotal: {}", format_money(view.totals.subtotal, symbol));
    println!("  VAT:      {}", format_money(view.totals.vat_amount, symbol));
    println!("  Discount: {}", format_money(view.totals.discount, symbol));
    println!("  Total:    {}", format_money(settlement.total_amount, symbol));
    println!("  Paid:     {}", format_money(settlement.paid_amount, symbol));
    println!("  Due:      {}", format_money(settlement.due_amount, symbol));
    println!("  Status:   {}", settlement.status);
}

/// List configured clients or providers
fn cmd_parties(cfg_dir: &Path, kind: DocumentKind) -> Result<()> {
    let (parties, file) = match kind {
        DocumentKind::Invoice => (load_clients(cfg_dir)?, "clients.toml"),
        DocumentKind::Bill => (load_providers(cfg_dir)?, "providers.toml"),
    };

    if parties.is_empty() {
        println!("No {}s configured.", party_label(kind).to_lowercase());
        println!("Add them to: {}/{}", cfg_dir.display(), file);
        return Ok(());
    }

    let mut sorted: Vec<_> = parties.iter().collect();
    sorted.sort_by_key(|(k, _)| *k);

    let rows: Vec<PartyRow> = sorted
        .iter()
        .map(|(id, party)| PartyRow {
            id: id.to_string(),
            name: party.name.clone(),
            email: party.email.clone(),
        })
        .collect();

    let table = Table::new(rows).with(Style::rounded()).to_string();
    println!("{table}");

    Ok(())
}

/// List catalog items
fn cmd_items(cfg_dir: &Path) -> Result<()> {
    let config = load_config(cfg_dir)?;
    let items = load_items(cfg_dir)?;

    if items.is_empty() {
        println!("No items configured.");
        println!("Add items to: {}/items.toml", cfg_dir.display());
        return Ok(());
    }

    let mut sorted: Vec<_> = items.iter().collect();
    sorted.sort_by_key(|(k, _)| *k);

    let rows: Vec<ItemRow> = sorted
        .iter()
        .map(|(id, item)| ItemRow {
            id: id.to_string(),
            description: item.description.clone(),
            rate: format_money(item.rate, &config.billing.currency_symbol),
            unit: format!("/{}", item.unit),
            vat: format!(
                "{}%",
                item.vat_percent.unwrap_or(config.billing.default_vat_percent)
            ),
        })
        .collect();

    let table = Table::new(rows).with(Style::rounded()).to_string();
    println!("{table}");

    Ok(())
}

/// Show counters and next document numbers
fn cmd_status(cfg_dir: &Path) -> Result<()> {
    let config = load_config(cfg_dir)?;
    let clients = load_clients(cfg_dir)?;
    let providers = load_providers(cfg_dir)?;
    let items = load_items(cfg_dir)?;
    let state = load_state(cfg_dir)?;

    let current_year = document_year(chrono::Local::now().date_naive())?;
    let next_number = |kind: DocumentKind| {
        format_document_number(
            config.billing.number_format(kind),
            current_year,
            state.next_seq(kind, current_year),
        )
    };

    let receivable: f64 = state
        .history
        .iter()
        .filter(|e| e.kind == DocumentKind::Invoice)
        .map(|e| e.outstanding())
        .sum();
    let payable: f64 = state
        .history
        .iter()
        .filter(|e| e.kind == DocumentKind::Bill)
        .map(|e| e.outstanding())
        .sum();

    let symbol = &config.billing.currency_symbol;

    println!("Billing Status");
    println!("{}", "-".repeat(50));
    println!("Config directory: {}", cfg_dir.display());
    println!("Company:          {}", config.company.name);
    println!("Clients:          {}", clients.len());
    println!("Providers:        {}", providers.len());
    println!("Items:            {}", items.len());
    println!("Next invoice:     {}", next_number(DocumentKind::Invoice));
    println!("Next bill:        {}", next_number(DocumentKind::Bill));
    println!("Receivable:       {}", format_money(receivable, symbol));
    println!("Payable:          {}", format_money(payable, symbol));

    if !state.history.is_empty() {
        println!();
        println!("Recent documents:");
        for entry in state.history.iter().rev().take(5) {
            println!(
                "  {} - {} - {} - {}",
                entry.number,
                entry.party,
                format_money(entry.total, symbol),
                entry.status()
            );
        }
    }

    Ok(())
}

/// Create an invoice or bill
fn cmd_create(cfg_dir: &Path, kind: DocumentKind, party: &str, args: &LineArgs) -> Result<()> {
    let request = DocumentRequest {
        kind,
        party,
        items: &args.item,
        lines: &args.line,
        discount: args.discount,
        date: args.date,
        dry_run: args.dry_run,
    };

    let entry = create_document(cfg_dir, &request)?;
    let config = load_config(cfg_dir)?;
    let parties = load_parties(cfg_dir, kind)?;

    if args.dry_run {
        println!("Draft (not saved)");
    } else {
        println!("Created {}", entry.number);
    }
    print_document(&config, &entry, &parties);

    Ok(())
}

/// List bills and invoices with three-way status (DUE / PARTIAL / PAID)
fn cmd_list(cfg_dir: &Path, kind: Option<DocumentKind>, limit: Option<usize>) -> Result<()> {
    let config = load_config(cfg_dir)?;
    let state = load_state(cfg_dir)?;
    let symbol = &config.billing.currency_symbol;

    // Indices follow the full history so they stay valid for other commands
    let documents: Vec<_> = state
        .history
        .iter()
        .rev()
        .enumerate()
        .filter(|(_, entry)| kind.map_or(true, |k| entry.kind == k))
        .take(limit.unwrap_or(usize::MAX))
        .collect();

    if documents.is_empty() {
        println!("No documents recorded yet.");
        return Ok(());
    }

    let rows: Vec<DocumentRow> = documents
        .iter()
        .map(|(idx, entry)| DocumentRow {
            index: idx + 1,
            number: entry.number.clone(),
            date: entry.date.to_string(),
            party: entry.party.clone(),
            total: format_money(entry.total, symbol),
            outstanding: format_money(entry.outstanding(), symbol),
            status: entry.status().to_string(),
        })
        .collect();

    let shown_total: f64 = documents.iter().map(|(_, entry)| entry.total).sum();
    let shown_paid: f64 = documents.iter().map(|(_, entry)| entry.paid_amount()).sum();

    let table = Table::new(rows).with(Style::rounded()).to_string();
    println!("{table}");
    println!("  Total:       {}", format_money(shown_total, symbol));
    println!("  Paid:        {}", format_money(shown_paid, symbol));
    println!("  Outstanding: {}", format_money(shown_total - shown_paid, symbol));
    println!();
    println!("{} documents recorded", state.history.len());
    println!("Use index number with show/edit/add-payment/remove-payment (e.g., 'ispbill show 1')");

    Ok(())
}

/// Show a document's breakdown
fn cmd_show(cfg_dir: &Path, document_ref: &str, json: bool) -> Result<()> {
    let config = load_config(cfg_dir)?;
    let state = load_state(cfg_dir)?;
    let number = resolve_document_number(&state, document_ref)?;
    let entry = find_document(&state, &number)?;

    if json {
        let view = DocumentView::new(entry, config.billing.due_days);
        println!("{}", serde_json::to_string_pretty(&view)?);
        return Ok(());
    }

    let parties = load_parties(cfg_dir, entry.kind)?;
    print_document(&config, entry, &parties);
    Ok(())
}

/// Edit an existing document
fn cmd_edit(
    cfg_dir: &Path,
    document_ref: &str,
    items: &[String],
    lines: &[String],
    discount: Option<f64>,
) -> Result<()> {
    let state = load_state(cfg_dir)?;
    let number = resolve_document_number(&state, document_ref)?;

    let entry = edit_document(cfg_dir, &number, items, lines, discount)?;
    let config = load_config(cfg_dir)?;
    let parties = load_parties(cfg_dir, entry.kind)?;

    println!("Updated {}", entry.number);
    print_document(&config, &entry, &parties);

    Ok(())
}

/// Record a payment against a document
fn cmd_add_payment(
    cfg_dir: &Path,
    document_ref: &str,
    amount: f64,
    date: Option<NaiveDate>,
) -> Result<()> {
    let config = load_config(cfg_dir)?;
    let mut state = load_state(cfg_dir)?;
    let number = resolve_document_number(&state, document_ref)?;
    let symbol = &config.billing.currency_symbol;

    let date = date.unwrap_or_else(|| chrono::Local::now().date_naive());
    let entry = find_document_mut(&mut state, &number)?;
    record_payment(entry, amount, date)?;

    let outstanding = entry.outstanding();
    let status = entry.status();
    save_state(cfg_dir, &state)?;

    if status == PaymentStatus::Paid {
        println!(
            "Recorded {} payment for {} (fully paid)",
            format_money(amount, symbol),
            number
        );
    } else {
        println!(
            "Recorded {} payment for {} ({} remaining)",
            format_money(amount, symbol),
            number,
            format_money(outstanding, symbol)
        );
    }

    Ok(())
}

/// Remove a payment from a document
fn cmd_remove_payment(cfg_dir: &Path, document_ref: &str, index: Option<usize>) -> Result<()> {
    let config = load_config(cfg_dir)?;
    let mut state = load_state(cfg_dir)?;
    let number = resolve_document_number(&state, document_ref)?;

    let entry = find_document_mut(&mut state, &number)?;
    let removed = remove_payment(entry, index)?;
    let status = entry.status();
    save_state(cfg_dir, &state)?;

    println!(
        "Removed {} payment from {} (now {})",
        format_money(removed.amount, &config.billing.currency_symbol),
        number,
        status
    );

    Ok(())
}

/// Show payment history for a document
fn cmd_payments(cfg_dir: &Path, document_ref: &str) -> Result<()> {
    let config = load_config(cfg_dir)?;
    let state = load_state(cfg_dir)?;
    let number = resolve_document_number(&state, document_ref)?;
    let entry = find_document(&state, &number)?;
    let symbol = &config.billing.currency_symbol;

    println!("Payments for {}", number);

    if entry.payments.is_empty() {
        println!("  No payments recorded.");
    } else {
        let rows: Vec<PaymentRow> = entry
            .payments
            .iter()
            .enumerate()
            .map(|(idx, p)| PaymentRow {
                index: idx + 1,
                date: p.date.to_string(),
                amount: format_money(p.amount, symbol),
            })
            .collect();

        let table = Table::new(rows).with(Style::rounded()).to_string();
        println!("{table}");
    }

    println!(
        "Total paid: {} / {} (Status: {})",
        format_money(entry.paid_amount(), symbol),
        format_money(entry.total, symbol),
        entry.status()
    );

    Ok(())
}

/// Print an account statement for one party
fn cmd_statement(
    cfg_dir: &Path,
    kind: DocumentKind,
    party_id: &str,
    filter: StatementFilter,
) -> Result<()> {
    let config = load_config(cfg_dir)?;
    let parties = load_parties(cfg_dir, kind)?;
    let state = load_state(cfg_dir)?;
    let symbol = &config.billing.currency_symbol;

    let party = parties.get(party_id).ok_or_else(|| match kind {
        DocumentKind::Invoice => BillingError::ClientNotFound(party_id.to_string()),
        DocumentKind::Bill => BillingError::ProviderNotFound(party_id.to_string()),
    })?;

    let statement = build_statement(&state, kind, party_id, &filter);

    if statement.rows.is_empty() {
        println!("No {kind}s found for '{party_id}' with the given filters.");
        return Ok(());
    }

    println!("Statement for {} ({})", party.name, party_id);

    let rows: Vec<StatementTableRow> = statement
        .rows
        .iter()
        .map(|row| StatementTableRow {
            number: row.number.clone(),
            date: row.date.to_string(),
            total: format_money(row.total, symbol),
            paid: format_money(row.paid, symbol),
            outstanding: format_money(row.outstanding, symbol),
            status: row.status.to_string(),
        })
        .collect();

    let table = Table::new(rows).with(Style::rounded()).to_string();
    println!("{table}");
    println!("  Documents:   {}", statement.rows.len());
    println!("  Total:       {}", format_money(statement.total, symbol));
    println!("  Paid:        {}", format_money(statement.paid, symbol));
    println!("  Outstanding: {}", format_money(statement.outstanding, symbol));

    Ok(())
}
