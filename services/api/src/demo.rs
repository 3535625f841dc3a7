use crate::infra::InMemoryMarketplaceRepository;
use chrono::{Duration, Local, NaiveDate};
use clap::Args;
use fairwork::error::AppError;
use fairwork::marketplace::domain::{
    ContractId, ContractStatus, EmployerSnapshot, HomeLocation, PaymentRecord, PaymentStatus,
    PaymentTerms, PaymentTracking, RateUnit, Requirements, WorkAssignment, WorkDetails, WorkSite,
    WorkTracking, WorkerProfile,
};
use fairwork::marketplace::{
    compute_progress, summarize_tracking, ContractWorkspace, FilterCriteria, LocationFilter,
    PaymentFilter, WorkSchedulePolicy,
};
use std::sync::Arc;

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Override the reporting date (defaults to today).
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) today: Option<NaiveDate>,
    /// Skip the work-log and payment tracking portion of the demo.
    #[arg(long)]
    pub(crate) skip_tracking: bool,
    /// Skip the matching and search portion of the demo.
    #[arg(long)]
    pub(crate) skip_discovery: bool,
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        today,
        skip_tracking,
        skip_discovery,
    } = args;

    let today = today.unwrap_or_else(|| Local::now().date_naive());
    let policy = WorkSchedulePolicy::default();

    println!("Gig-work marketplace demo (evaluated {today})");

    let repository = Arc::new(InMemoryMarketplaceRepository::default());
    let workspace = ContractWorkspace::new(repository, policy.clone());
    for listing in demo_listings(today) {
        workspace.post(listing)?;
    }

    if !skip_tracking {
        run_tracking_walkthrough(&workspace, today)?;
        render_snapshot_contract(today, &policy);
    }

    if !skip_discovery {
        run_discovery_walkthrough(&workspace)?;
    }

    Ok(())
}

fn run_tracking_walkthrough(
    workspace: &ContractWorkspace<InMemoryMarketplaceRepository>,
    today: NaiveDate,
) -> Result<(), AppError> {
    println!("\nContract tracking walkthrough");

    let id = ContractId("contract-demo-001".to_string());
    let record = workspace.accept(&id)?;
    println!(
        "- Accepted '{}' ({} {}/{})",
        record.assignment.title,
        record.assignment.payment.currency,
        record.assignment.payment.rate,
        record.assignment.payment.rate_unit.label()
    );

    for offset in 1..=3 {
        let date = today - Duration::days(4 - offset);
        let entry = workspace.submit_work_log(&id, date, 8.0, "Site work".to_string())?;
        workspace.approve_work_log(&id, &entry.id)?;
        println!("- Logged and approved 8.0h on {date} ({})", entry.id.0);
    }

    workspace.record_payment(
        &id,
        PaymentRecord {
            amount: 1500.0,
            status: PaymentStatus::Completed,
            method: "upi".to_string(),
            due_date: today,
            paid_date: Some(today),
        },
    )?;
    println!("- Recorded a completed payment of 1500");

    let dashboard = workspace.dashboard(&id, today)?;
    println!("\nDashboard for {}", dashboard.contract_id.0);
    println!("- Status: {}", dashboard.status_label);
    println!(
        "- Progress: {:.1}% ({} of {} days, {:.0}h worked)",
        dashboard.progress.percent_complete,
        dashboard.progress.completed_units,
        dashboard
            .progress
            .total_units
            .map(|total| total.to_string())
            .unwrap_or_else(|| "open-ended".to_string()),
        dashboard.progress.hours_worked
    );
    println!(
        "- Payments: due {:.0} | received {:.0} | pending {:.0}{}",
        dashboard.payments.total_due,
        dashboard.payments.total_received,
        dashboard.payments.pending_amount,
        if dashboard.payments.overpaid {
            " (overpaid)"
        } else {
            ""
        }
    );

    Ok(())
}

/// A contract already mid-flight, rendered straight from its snapshots to
/// show the pure calculators working without the service in the loop.
fn render_snapshot_contract(today: NaiveDate, policy: &WorkSchedulePolicy) {
    let mut contract = sample_listing("contract-demo-004");
    contract.title = "Residential Painting Work".to_string();
    contract.status = ContractStatus::InProgress;
    contract.work.start_date = today - Duration::days(11);
    contract.work.end_date = Some(today + Duration::days(19));
    contract.work_tracking = Some(WorkTracking {
        total_hours_worked: 88.0,
        days_worked: 11,
        estimated_total_hours: 240.0,
    });
    contract.payment_tracking = Some(PaymentTracking {
        total_due: 35000.0,
        total_received: 12000.0,
        pending_amount: 23000.0,
        last_payment_date: Some(today - Duration::days(2)),
    });

    println!("\nMid-flight contract snapshot: {}", contract.title);
    let progress = compute_progress(&contract, today, policy);
    println!(
        "- Progress: {:.1}% ({:.0}h of {:.0}h estimated)",
        progress.percent_complete,
        progress.hours_worked,
        progress.estimated_hours.unwrap_or(0.0)
    );
    if let Some(tracking) = &contract.payment_tracking {
        let summary = summarize_tracking(tracking);
        println!(
            "- Payments: due {:.0} | received {:.0} | pending {:.0}",
            summary.total_due, summary.total_received, summary.pending_amount
        );
    }
}

fn run_discovery_walkthrough(
    workspace: &ContractWorkspace<InMemoryMarketplaceRepository>,
) -> Result<(), AppError> {
    let worker = demo_worker();
    println!(
        "\nMatch analysis for {} ({} skills, minimum wage {:.0})",
        worker.id,
        worker.skills.len(),
        worker.minimum_wage
    );

    for scored in workspace.recommend(&worker)? {
        let report = &scored.report;
        println!(
            "- {}: {}% skill match | wage {}% of minimum ({}) | {} commute ({}) | {}",
            scored.assignment.title,
            report.skill_match_percent,
            report.wage_ratio_percent,
            report.wage_tier.label(),
            report.commute.label(),
            report.commute.distance_band(),
            report.fairness.label()
        );
        if !report.matching_skills.is_empty() {
            println!("  Matching skills: {}", report.matching_skills.join(", "));
        }
    }

    let criteria = FilterCriteria {
        location: Some(LocationFilter {
            city: Some("Bangalore".to_string()),
            ..Default::default()
        }),
        payment: Some(PaymentFilter {
            min_rate: Some(600.0),
            rate_unit: None,
        }),
        ..Default::default()
    };
    println!("\nSearch: Bangalore listings paying at least 600/day equivalent");
    let results = workspace.search(&criteria)?;
    if results.is_empty() {
        println!("- No listings matched");
    } else {
        for listing in results {
            println!(
                "- {} ({} {}/{}, {})",
                listing.title,
                listing.payment.currency,
                listing.payment.rate,
                listing.payment.rate_unit.label(),
                listing.work.duration_label
            );
        }
    }

    Ok(())
}

pub(crate) fn sample_listing(id: &str) -> WorkAssignment {
    WorkAssignment {
        id: ContractId(id.to_string()),
        title: "Construction Site Helper".to_string(),
        description: "General labor for a residential construction site".to_string(),
        employer: EmployerSnapshot {
            name: "Kumar Constructions".to_string(),
            company: Some("Kumar Constructions Pvt Ltd".to_string()),
            contact: "+91-9800000001".to_string(),
            rating: 4.3,
        },
        work: WorkDetails {
            site: WorkSite {
                address: "12 Market Road".to_string(),
                city: "Bangalore".to_string(),
                state: "Karnataka".to_string(),
                postal_code: "560001".to_string(),
            },
            start_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap_or_default(),
            end_date: NaiveDate::from_ymd_opt(2024, 1, 31),
            duration_label: "30 days".to_string(),
            working_hours: "9 AM - 5 PM".to_string(),
        },
        payment: PaymentTerms {
            rate_unit: RateUnit::Daily,
            rate: 800.0,
            currency: "INR".to_string(),
            terms: "Weekly settlement".to_string(),
        },
        requirements: Requirements {
            skills: vec!["Construction".to_string(), "Masonry".to_string()],
            min_experience_years: 1,
            tools: None,
        },
        status: ContractStatus::Available,
        fairness_score: 8.5,
        minimum_wage_compliant: true,
        applicant_count: 4,
        work_tracking: None,
        payment_tracking: None,
    }
}

fn demo_listings(today: NaiveDate) -> Vec<WorkAssignment> {
    let mut construction = sample_listing("contract-demo-001");
    construction.work.start_date = today - Duration::days(15);
    construction.work.end_date = Some(today + Duration::days(15));

    let mut plumbing = sample_listing("contract-demo-002");
    plumbing.title = "Plumbing Installation Work".to_string();
    plumbing.description = "Bathroom and kitchen fittings for a new apartment block".to_string();
    plumbing.employer.name = "Lakshmi Builders".to_string();
    plumbing.requirements.skills = vec!["Plumbing".to_string()];
    plumbing.work.start_date = today + Duration::days(3);
    plumbing.work.end_date = Some(today + Duration::days(18));
    plumbing.work.duration_label = "15 days".to_string();
    plumbing.payment = PaymentTerms {
        rate_unit: RateUnit::Fixed,
        rate: 45000.0,
        currency: "INR".to_string(),
        terms: "50% advance".to_string(),
    };
    plumbing.fairness_score = 7.2;

    let mut welding = sample_listing("contract-demo-003");
    welding.title = "Structural Welding".to_string();
    welding.description = "Fabrication work at a warehouse site".to_string();
    welding.employer.name = "Chennai Metal Works".to_string();
    welding.requirements.skills = vec!["Welding".to_string()];
    welding.work.site.city = "Chennai".to_string();
    welding.work.site.state = "Tamil Nadu".to_string();
    welding.work.start_date = today + Duration::days(7);
    welding.work.end_date = None;
    welding.work.duration_label = "Flexible".to_string();
    welding.payment.rate = 1100.0;
    welding.fairness_score = 5.4;

    vec![construction, plumbing, welding]
}

fn demo_worker() -> WorkerProfile {
    WorkerProfile {
        id: "worker-demo-001".to_string(),
        skills: vec!["Masonry".to_string(), "Plumbing".to_string()],
        minimum_wage: 500.0,
        max_travel_km: 25,
        home: HomeLocation {
            city: "Bangalore".to_string(),
            state: "Karnataka".to_string(),
            postal_code: "560010".to_string(),
        },
    }
}
