//! Notification email rendering.
//!
//! Rendering is a pure function of the project (with client contact
//! fields) and the recipient type, so it is tested without any mail
//! transport. The copy is Vietnamese, matching what clients of the
//! studio receive: an urgent register once the deadline has arrived
//! and a reminder register before it.

use chrono::NaiveDate;
use webdesk_core::deadline::DeadlineFraming;
use webdesk_core::types::Amount;

use webdesk_db::models::enums::{NotificationType, RecipientType};
use webdesk_db::models::project::ProjectWithClient;

/// A fully-rendered message, ready for the mailer.
#[derive(Debug, Clone)]
pub struct RenderedEmail {
    pub subject: String,
    pub body: String,
}

/// Render the notification for `project` as seen by `recipient_type`
/// on `today`.
pub fn render(
    project: &ProjectWithClient,
    notification_type: NotificationType,
    recipient_type: RecipientType,
    today: NaiveDate,
) -> RenderedEmail {
    match notification_type {
        NotificationType::HostingExpiry => render_hosting_expiry(project, recipient_type, today),
        NotificationType::PaymentDue => render_payment_due(project, recipient_type, today),
    }
}

fn render_hosting_expiry(
    project: &ProjectWithClient,
    recipient_type: RecipientType,
    today: NaiveDate,
) -> RenderedEmail {
    let name = &project.project.name;
    let framing = project
        .project
        .hosting_expiry_date
        .map(|d| DeadlineFraming::classify(today, d));
    let expired = framing.is_some_and(DeadlineFraming::is_past_or_today);

    let subject = if expired {
        format!("[KHẨN CẤP] Hosting dự án \"{name}\" đã hết hạn")
    } else {
        format!("Thông báo: Hosting dự án \"{name}\" sắp hết hạn")
    };

    let mut body = String::new();
    body.push_str(&greeting(project, recipient_type));
    body.push_str("\n\n");
    if expired {
        body.push_str(
            "Hosting cho dự án dưới đây đã hết hạn. \
             Vui lòng gia hạn ngay để tránh gián đoạn dịch vụ.\n\n",
        );
    } else {
        body.push_str(
            "Chúng tôi xin thông báo hosting cho dự án dưới đây sắp hết hạn. \
             Vui lòng chuẩn bị gia hạn để đảm bảo website hoạt động liên tục.\n\n",
        );
    }

    body.push_str(&format!("Dự án: {name}\n"));
    if let Some(domain) = &project.project.domain_name {
        body.push_str(&format!("Domain: {domain}\n"));
    }
    let package = project
        .project
        .hosting_package
        .map_or("N/A", |p| p.as_str());
    body.push_str(&format!("Gói hosting: {package}\n"));
    body.push_str(&format!(
        "Ngày hết hạn: {}{}\n",
        format_date_opt(project.project.hosting_expiry_date),
        framing.map(hosting_day_note).unwrap_or_default(),
    ));
    if project.project.hosting_price > 0 {
        body.push_str(&format!(
            "Phí gia hạn: {}\n",
            format_vnd(project.project.hosting_price)
        ));
    }

    body.push_str("\nNếu bạn cần hỗ trợ hoặc muốn gia hạn, vui lòng liên hệ chúng tôi ngay.\n");

    RenderedEmail { subject, body }
}

fn render_payment_due(
    project: &ProjectWithClient,
    recipient_type: RecipientType,
    today: NaiveDate,
) -> RenderedEmail {
    let name = &project.project.name;
    let framing = project
        .project
        .payment_due_date
        .map(|d| DeadlineFraming::classify(today, d));
    let overdue = framing.is_some_and(DeadlineFraming::is_past_or_today);

    let subject = if overdue {
        format!("[KHẨN CẤP] Dự án \"{name}\" đã quá hạn thanh toán")
    } else {
        format!("Nhắc nhở: Dự án \"{name}\" sắp đến hạn thanh toán")
    };

    let mut body = String::new();
    body.push_str(&greeting(project, recipient_type));
    body.push_str("\n\n");
    if overdue {
        body.push_str(
            "Khoản thanh toán cho dự án dưới đây đã quá hạn. \
             Vui lòng hoàn tất thanh toán trong thời gian sớm nhất.\n\n",
        );
    } else {
        body.push_str(
            "Chúng tôi xin nhắc về khoản thanh toán sắp đến hạn cho dự án dưới đây.\n\n",
        );
    }

    body.push_str(&format!("Dự án: {name}\n"));
    if let Some(domain) = &project.project.domain_name {
        body.push_str(&format!("Domain: {domain}\n"));
    }
    body.push_str(&format!(
        "Giá trị dự án: {}\n",
        format_vnd(project.project.project_price)
    ));
    if project.project.deposit_amount > 0 {
        body.push_str(&format!(
            "Đã đặt cọc: {}\n",
            format_vnd(project.project.deposit_amount)
        ));
    }
    body.push_str(&format!(
        "Còn lại: {}\n",
        format_vnd(project.project.remaining_amount)
    ));
    body.push_str(&format!(
        "Hạn thanh toán: {}{}\n",
        format_date_opt(project.project.payment_due_date),
        framing.map(payment_day_note).unwrap_or_default(),
    ));

    body.push_str("\nNếu đã thanh toán, vui lòng bỏ qua email này. Xin cảm ơn!\n");

    RenderedEmail { subject, body }
}

/// Clients are greeted by name; the admin copy gets a plain greeting.
fn greeting(project: &ProjectWithClient, recipient_type: RecipientType) -> String {
    match recipient_type {
        RecipientType::Client => format!("Xin chào {},", project.client_name),
        RecipientType::Admin => "Xin chào,".to_string(),
    }
}

fn hosting_day_note(framing: DeadlineFraming) -> String {
    match framing {
        DeadlineFraming::Upcoming { days } => format!(" (còn {days} ngày)"),
        DeadlineFraming::Today => " (hết hạn hôm nay)".to_string(),
        DeadlineFraming::Overdue { days } => format!(" (đã hết hạn {days} ngày)"),
    }
}

fn payment_day_note(framing: DeadlineFraming) -> String {
    match framing {
        DeadlineFraming::Upcoming { days } => format!(" (còn {days} ngày)"),
        DeadlineFraming::Today => " (hết hạn hôm nay)".to_string(),
        DeadlineFraming::Overdue { days } => format!(" (quá hạn {days} ngày)"),
    }
}

fn format_date_opt(date: Option<NaiveDate>) -> String {
    date.map_or_else(|| "N/A".to_string(), |d| d.format("%d/%m/%Y").to_string())
}

/// Whole-VND formatting with dot thousands separators: `1500000` →
/// `1.500.000₫`.
pub fn format_vnd(amount: Amount) -> String {
    let negative = amount < 0;
    let digits = amount.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 2);
    let offset = digits.len() % 3;
    for (i, c) in digits.chars().enumerate() {
        if i != 0 && (i + 3 - offset) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(c);
    }
    if negative {
        format!("-{grouped}₫")
    } else {
        format!("{grouped}₫")
    }
}
