use crate::infra::{FixtureCatalogClient, InMemoryCatalogRepository};
use chrono::Utc;
use clap::Args;
use slugsearch::catalog::links::PORTAL_URL;
use slugsearch::catalog::{
    time_ago, AvailabilityFilter, CatalogService, ClassTypeFilter, CourseView, FilterState,
    GeCategory,
};
use slugsearch::client::{CatalogClient, HttpCatalogClient};
use slugsearch::config::AppConfig;
use slugsearch::error::AppError;
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct SearchArgs {
    /// Subject and catalog number ("CSE 13S") or a title fragment ("calculus")
    pub(crate) query: String,
    /// Narrow by availability: all, low, medium, high
    #[arg(long, default_value = "all")]
    pub(crate) availability: AvailabilityFilter,
    /// Narrow by class type: all, in_person, synchronous_online, asynchronous_online
    #[arg(long, default_value = "all")]
    pub(crate) class_type: ClassTypeFilter,
    /// Substring to match across code, title, instructor, schedule, location
    #[arg(long)]
    pub(crate) search: Option<String>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// GE category code to browse (e.g. CC); defaults to the full catalog
    #[arg(long)]
    pub(crate) category: Option<String>,
    /// Narrow by availability: all, low, medium, high
    #[arg(long, default_value = "all")]
    pub(crate) availability: AvailabilityFilter,
    /// Narrow by class type: all, in_person, synchronous_online, asynchronous_online
    #[arg(long, default_value = "all")]
    pub(crate) class_type: ClassTypeFilter,
    /// Substring to match across code, title, instructor, schedule, location
    #[arg(long)]
    pub(crate) search: Option<String>,
}

fn filter_state(
    search: Option<String>,
    availability: AvailabilityFilter,
    class_type: ClassTypeFilter,
) -> FilterState {
    FilterState {
        search: search.unwrap_or_default(),
        availability,
        class_type,
    }
}

pub(crate) async fn run_search(args: SearchArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let repository = Arc::new(InMemoryCatalogRepository::default());
    let client = Arc::new(HttpCatalogClient::new(&config.catalog)?);
    let service = CatalogService::new(repository, client, config.catalog.term.clone());

    let filter = filter_state(args.search, args.availability, args.class_type);
    println!(
        "Class search: \"{}\" (term {})",
        args.query,
        service.term()
    );
    let views = service.class_search(&args.query, &filter).await?;
    render_course_views(&views);
    Ok(())
}

pub(crate) async fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let category = match args.category.as_deref() {
        None => GeCategory::AnyGe,
        Some(code) => match GeCategory::from_code(code) {
            Some(category) => category,
            None => {
                println!("Unknown GE category code '{code}'");
                return Ok(());
            }
        },
    };

    println!("Course catalog demo (fixture data, no network)");

    let repository = Arc::new(InMemoryCatalogRepository::default());
    let client = Arc::new(FixtureCatalogClient::new());
    let service = CatalogService::new(repository, client.clone(), "2248");

    let summary = service.refresh_listings().await?;
    let degrees = service.refresh_requirements().await?;
    println!(
        "Seeded {} courses across {} categories, {} degrees",
        summary.courses, summary.categories, degrees
    );

    let stamp = service.last_updated()?;
    println!("Last updated: {}", time_ago(stamp, Utc::now()));

    println!(
        "\nBrowsing: {} ({})",
        category.label(),
        category.code()
    );
    let everything = service.search(category, &FilterState::default())?;
    render_course_views(&everything);

    let filter = filter_state(args.search, args.availability, args.class_type);
    if !filter.is_unfiltered() {
        println!("\nWith filters applied");
        let narrowed = service.search(category, &filter)?;
        render_course_views(&narrowed);
    }

    println!("\nDegrees");
    for degree in service.degrees()? {
        println!("- {degree}");
        if let Some(requirements) = service.major_requirements(&degree)? {
            for group in &requirements.groups {
                println!("  {} ({} courses)", group.name, group.courses.len());
            }
        }
    }

    let upstream_stamp = client.fetch_last_update().await?;
    println!(
        "\nUpstream data stamped {}",
        time_ago(Some(upstream_stamp), Utc::now())
    );
    println!("Enroll via {PORTAL_URL}");

    Ok(())
}

fn render_course_views(views: &[CourseView]) {
    if views.is_empty() {
        println!("No classes matched.");
        return;
    }
    for view in views {
        let availability = view.availability_label.unwrap_or("no seat data");
        println!("- {} | {} | {}", view.code, view.title, view.instructor);
        println!(
            "  {} | {} | {}",
            view.schedule, view.location, view.class_type_label
        );
        println!(
            "  {} seats left ({}) | enroll #{}",
            view.spots_left, availability, view.enroll_id
        );
        if !view.link.is_empty() {
            println!("  {}", view.link);
        }
    }
}
