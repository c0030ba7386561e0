use clap::Parser;
use time::macros::format_description;
use time::{Duration, OffsetDateTime};

use videohub::api::ApiClient;
use videohub::api::types::clean;
use videohub::prefs;
use videohub::query::VideoQuery;
use videohub::row_view::status_tone;

#[derive(Parser, Debug)]
#[command(about = "Inspect VideoHub inventory queries from the terminal")]
struct Args {
    /// Override the server base URL from prefs.json
    #[arg(long, value_name = "URL")]
    server: Option<String>,

    /// Page to fetch
    #[arg(long, default_value_t = 1)]
    page: u64,

    /// Global keyword filter
    #[arg(long, value_name = "TEXT")]
    keyword: Option<String>,

    /// Filter by status
    #[arg(long)]
    status: Option<String>,

    /// Filter by host
    #[arg(long)]
    host: Option<String>,

    /// Filter by product id
    #[arg(long)]
    product_id: Option<String>,

    /// Only records finished within the last N days
    #[arg(long, value_name = "DAYS")]
    finish_days: Option<i64>,

    /// Sort column
    #[arg(long, value_name = "COLUMN")]
    sort: Option<String>,

    /// Print the query params but skip the API calls
    #[arg(long)]
    dry_run: bool,

    /// Limit printed rows
    #[arg(long, default_value_t = 20)]
    limit: usize,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let prefs = prefs::load_or_default();
    let base = args.server.unwrap_or(prefs.server_url);

    let mut query = VideoQuery::default();
    query.page = args.page;
    if let Some(keyword) = args.keyword {
        query.keyword = keyword;
    }
    if let Some(status) = args.status {
        query.status = status;
    }
    if let Some(host) = args.host {
        query.host = host;
    }
    if let Some(product_id) = args.product_id {
        query.product_id = product_id;
    }
    if let Some(sort) = args.sort {
        query.sort_by = sort;
    }
    if let Some(days) = args.finish_days {
        let start = OffsetDateTime::now_utc() - Duration::days(days);
        let format = format_description!("[year]-[month]-[day] 00:00");
        query.finish_start = start.format(&format)?;
    }

    let params = query.params();
    if args.dry_run {
        println!("{base}/api/videos => {params:?}");
        return Ok(());
    }

    let client = ApiClient::new(&base);

    let options = client.fetch_options().await?;
    println!(
        "options: {} hosts, {} categories, {} video types, {} platforms, {} statuses",
        options.hosts.len(),
        options.categories.len(),
        options.video_types.len(),
        options.platforms.len(),
        options.statuses.len(),
    );

    let page = client.fetch_videos(&params).await?;
    println!(
        "total: {} page: {}/{} rows: {}",
        page.total,
        page.page,
        page.total_pages,
        page.items.len()
    );

    for record in page.items.iter().take(args.limit) {
        let status = clean(record.status.as_deref());
        println!(
            "{:>6} | {:<10} | {:<8} {:?} | {}",
            record.id.map_or_else(|| "-".to_owned(), |id| id.to_string()),
            clean(record.product_id.as_deref()),
            status,
            status_tone(status),
            clean(record.title.as_deref()),
        );
    }

    Ok(())
}
