use std::path::PathBuf;
use std::sync::Arc;

use clap::{Arg, ArgMatches, Command};
use log::{debug, info};

use lims_client::auth::{Credentials, Lab, User};
use lims_client::catalog::{self, Unit};
use lims_client::config::ClientOptions;
use lims_client::dashboard;
use lims_client::error::{Error, Result};
use lims_client::forms::{self, StatusMessage};
use lims_client::inventory::{
    AddStockForm, AdminPanelHandle, BalancePoller, BalanceView, BorrowForm, RequestAction,
    StatusFilter,
};
use lims_client::labdata::LabSampleForm;
use lims_client::navigation::{Navigator, Page, View};
use lims_client::tanker::{ArrivalForm, DispatchForm, TankerHistoryView};
use lims_client::Lims;

fn text(name: &'static str, help: &'static str) -> Arg<'static> {
    Arg::new(name).long(name).value_name("TEXT").takes_value(true).help(help)
}

fn required(name: &'static str, help: &'static str) -> Arg<'static> {
    text(name, help).required(true)
}

fn date_args() -> [Arg<'static>; 2] {
    [
        text("date", "Date as YYYY-MM-DD, defaults to today"),
        text("time", "Time as HH:MM, defaults to now"),
    ]
}

fn cli() -> Command<'static> {
    Command::new("lims")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Laboratory and inventory management client")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("login")
                .about("Sign in and remember the session")
                .arg(required("username", "Account name"))
                .arg(text("password", "Password, read from LIMS_PASSWORD when omitted"))
                .arg(text("lab", "central or plant-1 .. plant-7").default_value("central")),
        )
        .subcommand(Command::new("logout").about("Forget the stored session"))
        .subcommand(Command::new("whoami").about("Show the signed-in user"))
        .subcommand(Command::new("dashboard").about("Show the summary dashboard"))
        .subcommand(
            Command::new("balances")
                .about("Show raw material stock levels")
                .arg(Arg::new("watch").long("watch").help("Keep polling until interrupted")),
        )
        .subcommand(
            Command::new("requests")
                .about("List borrow requests")
                .arg(text("status", "All, Pending, Approved or Rejected").default_value("All")),
        )
        .subcommand(
            Command::new("approve")
                .about("Approve a pending borrow request")
                .arg(Arg::new("id").required(true).help("Request ID")),
        )
        .subcommand(
            Command::new("reject")
                .about("Reject a pending borrow request")
                .arg(Arg::new("id").required(true).help("Request ID")),
        )
        .subcommand(
            Command::new("borrow")
                .about("Request raw material from inventory")
                .arg(text("material", "Raw material name"))
                .arg(required("quantity", "Amount to draw"))
                .arg(text("unit", "MT, KG or L").default_value("MT"))
                .arg(required("purpose", "What the material is for"))
                .arg(required("employee-name", "Requesting employee"))
                .arg(required("employee-id", "Requesting employee ID"))
                .arg(text("remarks", "Free text"))
                .args(date_args()),
        )
        .subcommand(
            Command::new("add-stock")
                .about("Record incoming stock")
                .arg(required("material", "Raw material name"))
                .arg(required("quantity", "Amount received"))
                .arg(text("unit", "MT, KG or L").default_value("MT"))
                .arg(required("supplier", "Supplier name"))
                .arg(text("invoice", "Invoice number"))
                .arg(text("remarks", "Free text"))
                .args(date_args()),
        )
        .subcommand(
            Command::new("history")
                .about("Show tanker movements")
                .arg(text("search", "Filter by tanker, material or batch")),
        )
        .subcommand(
            Command::new("arrival")
                .about("Record a raw material tanker arrival")
                .arg(required("tanker", "Tanker number"))
                .arg(required("material", "Raw material name"))
                .arg(required("quantity", "Quantity in MT"))
                .arg(text("supplier", "Supplier name"))
                .arg(text("driver", "Driver name"))
                .arg(text("batch", "Batch number"))
                .arg(text("order", "Order number"))
                .arg(text("sampling-date", "Sampling date, defaults to the arrival date"))
                .arg(text("sampling-time", "Sampling time, defaults to the arrival time"))
                .args(date_args()),
        )
        .subcommand(
            Command::new("dispatch")
                .about("Record a finished product dispatch")
                .arg(required("tanker", "Tanker number"))
                .arg(required("product", "Finished product"))
                .arg(required("quantity", "Quantity in MT"))
                .arg(required("batch", "Batch number"))
                .arg(text("driver", "Driver name"))
                .arg(text("destination", "Destination"))
                .arg(text("customer", "Customer name"))
                .arg(text("order", "Order number"))
                .args(date_args()),
        )
        .subcommand(
            Command::new("labdata")
                .about("Save a lab sample measurement")
                .arg(required("sample-id", "Sample ID"))
                .arg(required("batch-id", "Batch ID"))
                .arg(required("product", "Product sampled"))
                .arg(required("moisture", "Moisture in percent"))
                .arg(required("purity", "Purity in percent"))
                .arg(text("order", "Order number"))
                .arg(text("remarks", "Free text"))
                .args(date_args()),
        )
        .subcommand(Command::new("reports").about("List the available reports"))
        .subcommand(Command::new("analytics").about("Show production and quality analytics"))
}

fn value(matches: &ArgMatches, name: &str) -> String {
    matches.value_of(name).unwrap_or_default().to_string()
}

fn value_or(matches: &ArgMatches, name: &str, fallback: String) -> String {
    matches.value_of(name).map(str::to_string).unwrap_or(fallback)
}

fn unit(matches: &ArgMatches) -> Result<Unit> {
    value(matches, "unit").parse()
}

fn default_session_dir() -> PathBuf {
    std::env::var_os("HOME")
        .map(|home| PathBuf::from(home).join(".lims"))
        .unwrap_or_else(|| PathBuf::from(".lims"))
}

/// Print a form's success message, or hand its failure text back to `main`
fn report<T>(status: Option<&StatusMessage>, result: Result<T>) -> Result<()> {
    match (result, status) {
        (Ok(_), Some(status)) => {
            println!("{}", status.text);
            Ok(())
        }
        (Ok(_), None) => Ok(()),
        (Err(_), Some(status)) if !status.is_success() => Err(Error::general(&status.text)),
        (Err(e), _) => Err(e),
    }
}

/// Resolve `page` for the current session, failing when it is not reachable
fn open(user: Option<&User>, page: Page, material: Option<&str>) -> Result<(View, Navigator)> {
    let mut navigator = Navigator::for_session(user);
    let landed = navigator.navigate(user, page, material);
    if landed != page {
        info!("{} redirected to {}", page, landed);
    }
    match navigator.view(user) {
        View::Login => Err(Error::auth("Not signed in. Run `lims login` first.")),
        view => Ok((view, navigator)),
    }
}

fn signed_in(lims: &Lims) -> Result<User> {
    lims.session()
        .current()
        .cloned()
        .ok_or_else(|| Error::auth("Not signed in. Run `lims login` first."))
}

fn print_balances(view: &BalanceView) {
    if let Some(error) = view.error() {
        eprintln!("{}", error);
    }
    for level in view.levels() {
        println!(
            "{:<20} {:>10.2} {:<3} {:>5.1}%  {}",
            level.display_name,
            level.balance,
            level.unit,
            level.percent,
            level.status.label()
        );
    }
    let low = view.low_stock();
    if !low.is_empty() {
        println!("{} item(s) below minimum stock", low.len());
    }
}

async fn balances(lims: &Lims, watch: bool) -> Result<()> {
    let client = lims.inventory();
    if !watch {
        let mut view = BalanceView::new();
        view.refresh(&client, client.base_url()).await;
        print_balances(&view);
        return Ok(());
    }

    let base_url = client.base_url().to_string();
    let poller = BalancePoller::start(Arc::new(client), lims.options.poll_interval, &base_url);
    let mut updates = poller.subscribe();
    loop {
        tokio::select! {
            changed = updates.changed() => {
                if changed.is_err() {
                    break;
                }
                let view = updates.borrow_and_update().clone();
                if !view.is_loading() {
                    print_balances(&view);
                    println!();
                }
            }
            _ = tokio::signal::ctrl_c() => break,
        }
    }
    poller.stop();
    Ok(())
}

async fn requests(lims: &Lims, status: &str) -> Result<()> {
    let filter = StatusFilter::TABS
        .into_iter()
        .find(|tab| tab.label().eq_ignore_ascii_case(status))
        .ok_or_else(|| Error::validation(format!("Unknown status filter {:?}", status)))?;

    let handle = AdminPanelHandle::new(lims.inventory());
    handle.refresh().await?;

    let mut panel = handle.lock().await;
    panel.set_filter(filter);
    if let Some(notice) = panel.pending_notice() {
        println!("{}", notice);
    }
    let visible = panel.visible();
    if visible.is_empty() {
        println!("{}", panel.empty_message());
    }
    for request in visible {
        println!(
            "{:<12} {:<18} {:>8} {:<3} {:<20} {:<9} {}",
            request.request_id,
            catalog::material_display_name(&request.raw_material),
            request.quantity,
            request.unit,
            request.employee_name,
            request.status,
            request.approved_by
        );
    }
    Ok(())
}

async fn decide(lims: &Lims, user: &User, id: &str, action: RequestAction) -> Result<()> {
    if !user.role.is_admin() {
        return Err(Error::auth("Only central admins can approve or reject requests."));
    }
    let handle = AdminPanelHandle::new(lims.inventory());
    handle.refresh().await?;
    let status = handle.act(id, action, &user.username).await?;
    println!("Request {} is now {}", id, status);
    Ok(())
}

async fn run(matches: &ArgMatches) -> Result<()> {
    let mut options = ClientOptions::from_env()?;
    if options.session_dir.is_none() {
        options = options.with_session_dir(default_session_dir());
    }
    let mut lims = Lims::new_with_options(options)?;
    let restored = lims.session_mut().restore()?;
    debug!("Restored session: {}", restored.is_some());

    let (name, sub) = match matches.subcommand() {
        Some(pair) => pair,
        None => return Ok(()),
    };

    match name {
        "login" => {
            let lab: Lab = value(sub, "lab").parse()?;
            let password = value_or(
                sub,
                "password",
                std::env::var("LIMS_PASSWORD").unwrap_or_default(),
            );
            let credentials = Credentials::new(&value(sub, "username"), &password, lab);
            let user = lims.login(&credentials).await?;
            println!(
                "Signed in as {} ({}, {})",
                user.username,
                user.role.label(),
                user.lab.label()
            );
        }
        "logout" => {
            lims.logout()?;
            println!("Signed out");
        }
        "whoami" => {
            let user = signed_in(&lims)?;
            println!("{} ({}, {})", user.username, user.role.label(), user.lab.label());
        }
        "dashboard" => {
            open(lims.session().current(), Page::Dashboard, None)?;
            for card in dashboard::DASHBOARD_CARDS {
                println!("{:<20} {:>8}  {}", card.title, card.value, card.note);
            }
            println!("\nRecent activity");
            for activity in dashboard::RECENT_ACTIVITY {
                println!(
                    "{} {:<5} {:<16} {:<12} {}",
                    activity.sample,
                    activity.product,
                    activity.analyst,
                    activity.status,
                    activity.time
                );
            }
        }
        "balances" => {
            let (view, _) = open(lims.session().current(), Page::Inventory, None)?;
            if let View::Inventory(mode) = view {
                debug!("Inventory actions available: {:?}", mode.actions());
            }
            balances(&lims, sub.is_present("watch")).await?;
        }
        "requests" => {
            let user = signed_in(&lims)?;
            open(Some(&user), Page::InventoryAdmin, None)?;
            requests(&lims, &value(sub, "status")).await?;
        }
        "approve" | "reject" => {
            let user = signed_in(&lims)?;
            open(Some(&user), Page::InventoryAdmin, None)?;
            let action = if name == "approve" {
                RequestAction::Approve
            } else {
                RequestAction::Reject
            };
            decide(&lims, &user, &value(sub, "id"), action).await?;
        }
        "borrow" => {
            let material = value(sub, "material");
            let (_, navigator) = open(
                lims.session().current(),
                Page::InventoryBorrow,
                Some(&material),
            )?;
            let mut form = BorrowForm::with_timestamp(
                navigator.selected_material(),
                &value_or(sub, "date", forms::today()),
                &value_or(sub, "time", forms::now_hm()),
            );
            form.quantity = value(sub, "quantity");
            form.unit = unit(sub)?;
            form.purpose = value(sub, "purpose");
            form.employee_name = value(sub, "employee-name");
            form.employee_id = value(sub, "employee-id");
            form.remarks = value(sub, "remarks");
            let result = form.submit(&lims.inventory()).await;
            report(form.status(), result)?;
        }
        "add-stock" => {
            let user = signed_in(&lims)?;
            match open(Some(&user), Page::InventoryAdd, None)? {
                (View::InventoryAdd, _) => {
                    let mut form = AddStockForm::with_timestamp(
                        &value_or(sub, "date", forms::today()),
                        &value_or(sub, "time", forms::now_hm()),
                    );
                    form.material = value(sub, "material");
                    form.quantity = value(sub, "quantity");
                    form.unit = unit(sub)?;
                    form.supplier = value(sub, "supplier");
                    form.invoice_no = value(sub, "invoice");
                    form.remarks = value(sub, "remarks");
                    let result = form.submit(&lims.inventory(), &user).await;
                    report(form.status(), result)?;
                }
                _ => {
                    println!("Admins manage approvals instead of adding stock.");
                    requests(&lims, "Pending").await?;
                }
            }
        }
        "history" => {
            open(lims.session().current(), Page::TankerHistory, None)?;
            let client = lims.tanker();
            let mut view = TankerHistoryView::new();
            view.set_search(&value(sub, "search"));
            if view.load(&client).await.is_err() {
                if let Some(error) = view.error() {
                    eprintln!("{}", error);
                }
            }
            for entry in view.visible() {
                println!(
                    "#{:<3} {:<12} {:<22} {:<18} {:>8} MT  {} {}  {:<10} {}",
                    entry.id,
                    entry.tanker_number,
                    entry.kind_label(),
                    entry.material,
                    entry.quantity,
                    entry.date,
                    entry.time,
                    entry.batch_number,
                    entry.status
                );
            }
        }
        "arrival" => {
            open(lims.session().current(), Page::TankerArrival, None)?;
            let date = value_or(sub, "date", forms::today());
            let time = value_or(sub, "time", forms::now_hm());
            let mut form = ArrivalForm::new();
            form.tanker_number = value(sub, "tanker");
            form.raw_material = value(sub, "material");
            form.quantity = value(sub, "quantity");
            form.supplier = value(sub, "supplier");
            form.driver_name = value(sub, "driver");
            form.sampling_date = value_or(sub, "sampling-date", date.clone());
            form.sampling_time = value_or(sub, "sampling-time", time.clone());
            form.arrival_date = date;
            form.arrival_time = time;
            form.batch_number = value(sub, "batch");
            form.order_number = value(sub, "order");
            let result = form.submit(&lims.tanker()).await;
            report(form.status(), result)?;
        }
        "dispatch" => {
            open(lims.session().current(), Page::TankerDispatch, None)?;
            let mut form = DispatchForm::new();
            form.tanker_number = value(sub, "tanker");
            form.finished_product = value(sub, "product");
            form.quantity = value(sub, "quantity");
            form.driver_name = value(sub, "driver");
            form.dispatch_date = value_or(sub, "date", forms::today());
            form.dispatch_time = value_or(sub, "time", forms::now_hm());
            form.destination = value(sub, "destination");
            form.customer_name = value(sub, "customer");
            form.batch_number = value(sub, "batch");
            form.order_number = value(sub, "order");
            let result = form.submit(&lims.tanker()).await;
            report(form.status(), result)?;
        }
        "labdata" => {
            let user = signed_in(&lims)?;
            open(Some(&user), Page::LabDataForm, None)?;
            let mut form = LabSampleForm::new(&user.username);
            form.sample_id = value(sub, "sample-id");
            form.batch_id = value(sub, "batch-id");
            form.order_number = value(sub, "order");
            form.product = value(sub, "product");
            form.moisture = value(sub, "moisture");
            form.purity = value(sub, "purity");
            form.sample_date = value_or(sub, "date", forms::today());
            form.sample_time = value_or(sub, "time", forms::now_hm());
            form.remarks = value(sub, "remarks");
            let result = form.submit(&lims.labdata()).await;
            report(form.status(), result)?;
        }
        "reports" => {
            open(lims.session().current(), Page::Reports, None)?;
            for category in dashboard::REPORT_CATEGORIES {
                println!("{}", category.category);
                for report in category.reports {
                    println!("  {:<32} {:<15} {}", report.name, report.period, report.format);
                }
            }
        }
        "analytics" => {
            open(lims.session().current(), Page::Analytics, None)?;
            println!("Monthly production (MT)");
            for month in dashboard::ANALYTICS_PRODUCTION {
                println!("  {} {:>6}", month.month, month.total());
            }
            println!("Product contribution");
            for share in dashboard::PRODUCT_CONTRIBUTION {
                println!("  {:<8} {:>3}%", share.name, share.value);
            }
            println!("Samples per lab");
            for lab in dashboard::SAMPLES_PER_LAB {
                println!("  {:<8} {:>4}", lab.lab, lab.samples);
            }
            for kpi in dashboard::analytics_kpis() {
                println!("{:<30} {:>10}  {}", kpi.title, kpi.value, kpi.note);
            }
        }
        other => return Err(Error::general(format!("Unknown command {}", other))),
    }

    Ok(())
}

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();
    pretty_env_logger::init();

    let matches = cli().get_matches();
    if let Err(e) = run(&matches).await {
        let base_url = std::env::var("LIMS_API_URL")
            .unwrap_or_else(|_| lims_client::config::DEFAULT_BASE_URL.to_string());
        eprintln!("{}", e.user_message(&base_url));
        std::process::exit(1);
    }
}
