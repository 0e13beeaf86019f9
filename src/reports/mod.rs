use chrono::{Days, Months, NaiveDate};
use serde::Serialize;

use crate::error::Result;
use crate::users::UserDirectory;

/// 注册活动报表
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct UserReport {
    pub total_users: u64,
    pub today_users: u64,
    pub last_week_users: u64,
    pub last_month_users: u64,
}

/// 统计某表单的注册活动
///
/// 今日按日期相等计数, 近一周/近一月按严格晚于窗口起点计数.
pub fn user_report(
    directory: &dyn UserDirectory,
    form_id: u64,
    today: NaiveDate,
) -> Result<UserReport> {
    let week_ago = today - Days::new(7);
    let month_ago = today - Months::new(1);

    let mut report = UserReport::default();
    for date in directory.registration_dates(form_id)? {
        report.total_users += 1;
        if date == today {
            report.today_users += 1;
        }
        if date > week_ago {
            report.last_week_users += 1;
        }
        if date > month_ago {
            report.last_month_users += 1;
        }
    }
    Ok(report)
}
