//! Read-only datasets behind the dashboard, reports and analytics pages
//!
//! None of these come from the server yet; they are fixed figures so the
//! screens have something to render.

use serde::Serialize;

/// Headline figure on a summary card
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SummaryCard {
    pub title: &'static str,
    pub value: &'static str,
    pub note: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MonthlyProduction {
    pub month: &'static str,
    pub urea: u32,
    pub dap: u32,
    pub npk: u32,
    /// Only tracked on the analytics page
    pub ssp: Option<u32>,
}

impl MonthlyProduction {
    pub fn total(&self) -> u32 {
        self.urea + self.dap + self.npk + self.ssp.unwrap_or(0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DailySamples {
    pub day: &'static str,
    pub samples: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Activity {
    pub id: u32,
    pub sample: &'static str,
    pub product: &'static str,
    pub analyst: &'static str,
    pub status: &'static str,
    pub time: &'static str,
}

pub const DASHBOARD_CARDS: [SummaryCard; 4] = [
    SummaryCard { title: "Samples Today", value: "48", note: "+12% from yesterday" },
    SummaryCard { title: "Pending Approvals", value: "12", note: "Requires attention" },
    SummaryCard { title: "Inventory Alerts", value: "3", note: "Low stock items" },
    SummaryCard { title: "Monthly Production", value: "14,400", note: "MT (Metric Tons)" },
];

const fn production(
    month: &'static str,
    urea: u32,
    dap: u32,
    npk: u32,
    ssp: Option<u32>,
) -> MonthlyProduction {
    MonthlyProduction { month, urea, dap, npk, ssp }
}

pub const DASHBOARD_PRODUCTION: [MonthlyProduction; 6] = [
    production("Jan", 4500, 3200, 2800, None),
    production("Feb", 4800, 3400, 3000, None),
    production("Mar", 5200, 3600, 3200, None),
    production("Apr", 4900, 3500, 3100, None),
    production("May", 5500, 3800, 3400, None),
    production("Jun", 5300, 3700, 3300, None),
];

pub const DAILY_SAMPLES: [DailySamples; 7] = [
    DailySamples { day: "Mon", samples: 45 },
    DailySamples { day: "Tue", samples: 52 },
    DailySamples { day: "Wed", samples: 48 },
    DailySamples { day: "Thu", samples: 61 },
    DailySamples { day: "Fri", samples: 55 },
    DailySamples { day: "Sat", samples: 38 },
    DailySamples { day: "Sun", samples: 28 },
];

pub const RECENT_ACTIVITY: [Activity; 5] = [
    Activity {
        id: 1,
        sample: "S-2026-0205-001",
        product: "Urea",
        analyst: "John Doe",
        status: "Completed",
        time: "2 hours ago",
    },
    Activity {
        id: 2,
        sample: "S-2026-0205-002",
        product: "DAP",
        analyst: "Jane Smith",
        status: "Pending",
        time: "3 hours ago",
    },
    Activity {
        id: 3,
        sample: "S-2026-0205-003",
        product: "NPK",
        analyst: "Mike Johnson",
        status: "Completed",
        time: "4 hours ago",
    },
    Activity {
        id: 4,
        sample: "S-2026-0205-004",
        product: "Urea",
        analyst: "Sarah Williams",
        status: "In Progress",
        time: "5 hours ago",
    },
    Activity {
        id: 5,
        sample: "S-2026-0205-005",
        product: "SSP",
        analyst: "David Brown",
        status: "Completed",
        time: "6 hours ago",
    },
];

/// A downloadable report
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Report {
    pub name: &'static str,
    pub period: &'static str,
    pub format: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ReportCategory {
    pub category: &'static str,
    pub reports: [Report; 4],
}

const fn report(name: &'static str, period: &'static str, format: &'static str) -> Report {
    Report { name, period, format }
}

pub const REPORT_CATEGORIES: [ReportCategory; 5] = [
    ReportCategory {
        category: "Production Reports",
        reports: [
            report("Daily Production Summary", "Daily", "PDF/Excel"),
            report("Monthly Production Analysis", "Monthly", "PDF/Excel"),
            report("Product-wise Output Report", "Custom", "PDF/Excel"),
            report("Batch Production Report", "Per Batch", "PDF"),
        ],
    },
    ReportCategory {
        category: "Inventory Reports",
        reports: [
            report("Current Stock Levels", "Real-time", "PDF/Excel"),
            report("Material Consumption Report", "Daily/Monthly", "Excel"),
            report("Low Stock Alert Report", "Real-time", "PDF"),
            report("Inventory Movement History", "Custom", "Excel"),
        ],
    },
    ReportCategory {
        category: "Lab Performance Reports",
        reports: [
            report("Sample Analysis Report", "Daily", "PDF"),
            report("Quality Control Metrics", "Weekly/Monthly", "PDF/Excel"),
            report("Analyst Performance Report", "Monthly", "PDF"),
            report("Test Result Summary", "Custom", "Excel"),
        ],
    },
    ReportCategory {
        category: "Tanker & Logistics Reports",
        reports: [
            report("Tanker Arrival Register", "Daily", "PDF/Excel"),
            report("Dispatch Summary Report", "Daily/Monthly", "PDF/Excel"),
            report("Material Traceability Report", "Per Batch", "PDF"),
            report("Supplier Performance Report", "Monthly", "Excel"),
        ],
    },
    ReportCategory {
        category: "Compliance & Audit Reports",
        reports: [
            report("Regulatory Compliance Report", "Monthly", "PDF"),
            report("Audit Trail Report", "Custom", "PDF/Excel"),
            report("Quality Assurance Summary", "Monthly", "PDF"),
            report("Safety & Standards Report", "Monthly", "PDF"),
        ],
    },
];

pub const ANALYTICS_PRODUCTION: [MonthlyProduction; 6] = [
    production("Jan", 4500, 3200, 2800, Some(1800)),
    production("Feb", 4800, 3400, 3000, Some(1900)),
    production("Mar", 5200, 3600, 3200, Some(2100)),
    production("Apr", 4900, 3500, 3100, Some(2000)),
    production("May", 5500, 3800, 3400, Some(2200)),
    production("Jun", 5300, 3700, 3300, Some(2150)),
];

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MaterialUsage {
    pub day: &'static str,
    pub nitrogen: u32,
    pub sulphuric: u32,
    pub ammonia: u32,
}

pub const DAILY_MATERIAL_USAGE: [MaterialUsage; 7] = [
    MaterialUsage { day: "Mon", nitrogen: 120, sulphuric: 85, ammonia: 95 },
    MaterialUsage { day: "Tue", nitrogen: 135, sulphuric: 92, ammonia: 105 },
    MaterialUsage { day: "Wed", nitrogen: 125, sulphuric: 88, ammonia: 98 },
    MaterialUsage { day: "Thu", nitrogen: 142, sulphuric: 95, ammonia: 110 },
    MaterialUsage { day: "Fri", nitrogen: 138, sulphuric: 90, ammonia: 108 },
    MaterialUsage { day: "Sat", nitrogen: 110, sulphuric: 75, ammonia: 85 },
    MaterialUsage { day: "Sun", nitrogen: 95, sulphuric: 65, ammonia: 72 },
];

/// Share of total output in percent
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Contribution {
    pub name: &'static str,
    pub value: u32,
}

pub const PRODUCT_CONTRIBUTION: [Contribution; 5] = [
    Contribution { name: "Urea", value: 35 },
    Contribution { name: "DAP", value: 25 },
    Contribution { name: "NPK", value: 22 },
    Contribution { name: "SSP", value: 12 },
    Contribution { name: "Others", value: 6 },
];

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LabSamples {
    pub lab: &'static str,
    pub samples: u32,
}

pub const SAMPLES_PER_LAB: [LabSamples; 8] = [
    LabSamples { lab: "Central", samples: 425 },
    LabSamples { lab: "Plant-1", samples: 285 },
    LabSamples { lab: "Plant-2", samples: 310 },
    LabSamples { lab: "Plant-3", samples: 265 },
    LabSamples { lab: "Plant-4", samples: 295 },
    LabSamples { lab: "Plant-5", samples: 275 },
    LabSamples { lab: "Plant-6", samples: 240 },
    LabSamples { lab: "Plant-7", samples: 220 },
];

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct QualityMetric {
    pub week: &'static str,
    pub purity: f64,
    pub moisture: f64,
}

pub const QUALITY_METRICS: [QualityMetric; 4] = [
    QualityMetric { week: "Week 1", purity: 98.5, moisture: 0.8 },
    QualityMetric { week: "Week 2", purity: 98.7, moisture: 0.7 },
    QualityMetric { week: "Week 3", purity: 98.3, moisture: 0.9 },
    QualityMetric { week: "Week 4", purity: 98.9, moisture: 0.6 },
];

/// Samples analysed across every lab
pub fn total_samples() -> u32 {
    SAMPLES_PER_LAB.iter().map(|lab| lab.samples).sum()
}

/// Mean weekly purity, rounded to one decimal
pub fn average_purity() -> f64 {
    let sum: f64 = QUALITY_METRICS.iter().map(|m| m.purity).sum();
    (sum / QUALITY_METRICS.len() as f64 * 10.0).round() / 10.0
}

/// Key performance indicators shown under the analytics charts
pub fn analytics_kpis() -> [SummaryCard; 4] {
    [
        SummaryCard {
            title: "Total Production (This Month)",
            value: "14,400 MT",
            note: "+8% from last month",
        },
        SummaryCard { title: "Average Purity", value: "98.6%", note: "Within standards" },
        SummaryCard { title: "Samples Analyzed", value: "2,315", note: "This month" },
        SummaryCard { title: "Material Efficiency", value: "94.2%", note: "+2.3% improvement" },
    ]
}
