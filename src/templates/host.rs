//! Notification sent to the host.

use super::{escape_html, format_registration_time};
use crate::company::{CompanyConfig, Host};
use crate::domain::VisitorFormData;
use crate::models::EmailMessage;
use chrono::NaiveDateTime;

/// Build the host's new-visitor notification.
///
/// `registered_at` is stamped into the body as the registration time.
pub fn host_notification(
    form: &VisitorFormData,
    host: &Host,
    company: &CompanyConfig,
    registered_at: NaiveDateTime,
) -> EmailMessage {
    let subject = format!("New Visitor Registration - {}", form.visitor_name);
    let text = format!(
        "You have a new visitor: {} ({}) scheduled to visit for: {}",
        form.visitor_name, form.visitor_email, form.purpose_of_visit
    );

    EmailMessage::new(
        host.email.clone(),
        subject,
        text,
        render_html(form, host, company, registered_at),
    )
}

fn render_html(
    form: &VisitorFormData,
    host: &Host,
    company: &CompanyConfig,
    registered_at: NaiveDateTime,
) -> String {
    let (date, time) = format_registration_time(registered_at);

    let primary = escape_html(&company.colors.primary);
    let secondary = escape_html(&company.colors.secondary);
    let company_name = escape_html(&company.name);
    let logo = escape_html(&company.logo);
    let host_name = escape_html(&host.name);
    let visitor_name = escape_html(&form.visitor_name);
    let visitor_email = escape_html(&form.visitor_email);
    let phone = escape_html(&form.full_phone_number());
    let purpose = escape_html(&form.purpose_of_visit);

    format!(
        r#"<div style="font-family: 'Segoe UI', Tahoma, Geneva, Verdana, sans-serif; max-width: 600px; margin: 0 auto; background-color: #ffffff;">
  <div style="background: linear-gradient(135deg, {primary}, {secondary}); padding: 20px; text-align: center; border-radius: 12px 12px 0 0;">
    <img src="{logo}" alt="{company_name}" style="max-height: 48px; margin-bottom: 10px;">
    <h1 style="color: #ffffff; margin: 0; font-size: 24px; font-weight: 600;">New Visitor Registration</h1>
    <p style="color: rgba(255,255,255,0.9); margin: 10px 0 0 0; font-size: 14px;">You have a new visitor scheduled</p>
  </div>
  <div style="padding: 20px;">
    <p style="color: #374151; font-size: 16px; margin-bottom: 15px;">Dear <strong style="color: {primary};">{host_name}</strong>,</p>
    <p style="color: #374151; font-size: 14px; margin-bottom: 20px;">You have a new visitor registration that requires your attention.</p>
    <div style="background: #fef3c7; border: 1px solid #fbbf24; border-radius: 6px; padding: 10px; margin: 15px 0; text-align: center; font-weight: 600; color: #92400e;">Registration Time: {date} at {time}</div>
    <div style="background: #f8fafc; border: 1px solid #e5e7eb; border-radius: 8px; padding: 15px; margin: 15px 0;">
      <h3 style="color: {primary}; margin: 0 0 10px 0; font-size: 16px;">Visitor Information</h3>
      <p style="margin: 5px 0; font-size: 14px;"><strong>Name:</strong> {visitor_name}</p>
      <p style="margin: 5px 0; font-size: 14px;"><strong>Email:</strong> <a href="mailto:{visitor_email}" style="color: {primary}; text-decoration: none;">{visitor_email}</a></p>
      <p style="margin: 5px 0; font-size: 14px;"><strong>Phone:</strong> <a href="tel:{phone}" style="color: {primary}; text-decoration: none;">{phone}</a></p>
    </div>
    <div style="background: #eff6ff; border-left: 4px solid {primary}; padding: 15px; margin: 15px 0; border-radius: 0 8px 8px 0;">
      <h4 style="margin-top: 0; color: {primary};">Purpose of Visit:</h4>
      <p style="margin-bottom: 0; font-size: 16px;">{purpose}</p>
    </div>
    <div style="background: #fee2e2; border: 1px solid #fca5a5; border-radius: 6px; padding: 15px; margin: 20px 0; color: #991b1b; font-weight: 600;"><strong>Action Required:</strong> Please prepare for the visitor's arrival and ensure they receive proper assistance.</div>
  </div>
  <div style="background-color: #f9fafb; padding: 15px; text-align: center; border-radius: 0 0 12px 12px;">
    <p style="color: #6b7280; margin: 0; font-size: 12px;"><strong style="color: {primary};">{company_name} Visitor Management System</strong></p>
    <p style="color: #9ca3af; margin: 5px 0 0 0; font-size: 11px;">This is an automated notification. Please do not reply to this email.</p>
  </div>
</div>
"#
    )
}
