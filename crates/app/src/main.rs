//! Development shell: wires the client core against the in-memory backends
//! and walks the main flows end-to-end, logging each gate decision.

use std::sync::Arc;

use chrono::{Duration, Utc};
use tracing::info;

use fitdesk_app::{AdminService, AppConfig, AppServices, MemberService, Navigator, RouteTable};
use fitdesk_auth::{Role, SessionSnapshot};
use fitdesk_billing::{format_cents, BillStatus, NewBill};
use fitdesk_gym::GymInfo;
use fitdesk_identity::{AuthProvider, IdentityResolver, SessionHandle};
use fitdesk_infra::{
    CredentialAdmin, DirectoryRecord, InMemoryAuthProvider, InMemoryBillStore,
    InMemoryCredentialAdmin, InMemoryGymInfoStore, InMemoryMembershipStore,
    InMemoryUserDirectory, UserDirectory,
};
use fitdesk_members::{MemberProfile, NewMember, PlanKind};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    fitdesk_observability::init();
    let config = AppConfig::from_env();

    let directory = Arc::new(InMemoryUserDirectory::new());
    let memberships = Arc::new(InMemoryMembershipStore::new());
    let bills = Arc::new(InMemoryBillStore::new());
    let gym_info = Arc::new(InMemoryGymInfoStore::new());
    let credentials = Arc::new(InMemoryCredentialAdmin::new());
    let provider = Arc::new(InMemoryAuthProvider::new());

    // Bootstrap administrator account + directory record.
    let admin_account = credentials.create_account(&config.admin_email).await?;
    let today = Utc::now().date_naive();
    directory
        .insert(DirectoryRecord {
            profile: MemberProfile {
                identity_id: admin_account.identity_id.clone(),
                name: config.admin_name.clone(),
                email: config.admin_email.clone(),
                phone: "n/a".into(),
                address: "n/a".into(),
                join_date: today,
                created_at: Utc::now(),
            },
            role: Role::Admin.as_str().to_string(),
        })
        .await?;

    let session = IdentityResolver::start(provider.as_ref(), directory.clone()).await;
    let mut waiter = session.clone();

    let services = Arc::new(AppServices {
        directory: directory.clone(),
        memberships: memberships.clone(),
        bills: bills.clone(),
        gym_info: gym_info.clone(),
        credentials: credentials.clone(),
        session: session.clone(),
    });
    let navigator = Navigator::new(session.clone(), RouteTable::standard());
    let admin = AdminService::new(services.clone());
    let member = MemberService::new(services.clone());

    // Anonymous visitor.
    wait_until(&mut waiter, |snapshot| !snapshot.is_authenticated()).await;
    info!(outcome = ?navigator.navigate("/admin"), "anonymous → /admin");

    // Administrator signs in.
    provider.sign_in(
        admin_account.identity_id.as_str(),
        Some(&config.admin_name),
        Some(&config.admin_email),
    );
    wait_until(&mut waiter, |snapshot| {
        snapshot.identity_id() == Some(&admin_account.identity_id)
    })
    .await;
    info!(outcome = ?navigator.navigate("/admin"), "admin → /admin");

    admin
        .save_gym_info(GymInfo {
            name: config.gym_name.clone(),
            description: "Strength, cardio and mobility under one roof".into(),
            ..GymInfo::default()
        })
        .await?;

    let added = admin
        .add_member(NewMember {
            name: "Ada Lovelace".into(),
            email: "ada@example.com".into(),
            phone: "555-0100".into(),
            address: "1 Analytical Way".into(),
            join_date: today,
            plan: PlanKind::Monthly,
            fee_cents: 5000,
        })
        .await?;

    let bill = admin
        .create_bill(
            &added.identity_id,
            NewBill {
                description: "Monthly fee".into(),
                amount_cents: 5000,
                due_date: today + Duration::days(30),
                status: BillStatus::Pending,
            },
        )
        .await?;

    let dashboard = admin.dashboard().await?;
    info!(
        members = dashboard.total_members,
        pending = dashboard.pending_payments,
        revenue = %format_cents(dashboard.total_revenue_cents),
        "admin dashboard"
    );
    let report = admin.bill_report_csv().await?;
    info!(rows = report.lines().count(), "bill report exported");

    // The new member signs in; the admin session is replaced wholesale.
    provider.sign_in(added.identity_id.as_str(), Some("Ada Lovelace"), None);
    wait_until(&mut waiter, |snapshot| {
        snapshot.identity_id() == Some(&added.identity_id)
    })
    .await;
    info!(outcome = ?navigator.navigate("/admin"), "member → /admin");

    let overview = member.dashboard().await?;
    info!(
        due = %format_cents(overview.total_due_cents),
        bills = overview.bills.len(),
        "member dashboard"
    );
    member.pay_bill(&bill.id).await?;
    info!(due = %format_cents(member.dashboard().await?.total_due_cents), "after payment");

    provider.sign_out().await?;
    wait_until(&mut waiter, |snapshot| !snapshot.is_authenticated()).await;
    info!(outcome = ?navigator.navigate("/member"), "signed out → /member");

    Ok(())
}

async fn wait_until(
    handle: &mut SessionHandle,
    predicate: impl Fn(&SessionSnapshot) -> bool,
) -> SessionSnapshot {
    loop {
        let snapshot = handle.settled().await;
        if predicate(&snapshot) {
            return snapshot;
        }
        handle.changed().await;
    }
}
