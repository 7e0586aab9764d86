//! Starter data served for collections that have never been written.
//!
//! Seeds are fixed so that two fresh stores show the same first screen.

use crate::models::{
    Apartment, ApartmentStatus, ChecklistItem, DailyLogEntry, GalleryPhoto, LogType, Milestone,
    MilestoneColor, MilestoneStatus,
};

const LOFTS_IMG: &str = "https://lh3.googleusercontent.com/aida-public/AB6AXuBaaRCFT_R7kjkgmCCIHWLj10d2mHN-6rmb_eS9NT5cQyh-RooTrFdTeZNnxQNH1KHW2DrYJjEPVS1Wh_pWc9phh3_MBasWq_KYsAhpXO7MVvcTaYKhc5k9ruG_Bxv45ZIU8P6G4577vl04Rw7yKlrPwNXG6PwpK7tz4fLOz-Dx1D8-7mLRuT7_OnxNE2Lqq2gZZISXWBgMBp9OebhxI_AqYuG423YEfdOBIXgohoChBz_sp7ZYa4jWXPvLwrRHc79x7I7sJmLS-FE";
const GREENVIEW_IMG: &str = "https://lh3.googleusercontent.com/aida-public/AB6AXuAvZP7FlKC0puqUfpcotcWI1lqa8GefOZre8elhIic3idQI9pN4fEvGpT0Lg0_VKGipPA-hq17KU1jfDfma2o_Cn5kkELA5wGR130GmZfocypdWGkQP7uBRyWpt-IzXCnOEP22NFxOhCsrPXvVZyKSBpX75cAY7DT1NPQMQg_6Vt0S6Rmmq7dqHKcGJ3UA5sXL9FF0Z94jUieTQAfpLmL6_gQWHxyBabBWP7o3qVmCWS9suVzdv3Jg3g4A_Z7YFuXNp3GIGmV7fnZ8";
const SUNNYSIDE_IMG: &str = "https://lh3.googleusercontent.com/aida-public/AB6AXuD1YkNVVKyLOlIrW8n9EN8Q9opRrp5oXvZfUnEI1zas0HrxMv43lNcOWmzL3XBFcFNgiIj6jGV32dvDhyepx08PSti1MKGN-JA3ZxHvC6SC-3O6u30wkXkvq3YJ_9JycHGfIzjifx6whuZTPO81Vmj6VdUg2rtY_V5ARCcBr-ZRo2kUC88Ccz73iGuSJb-36PXkeD2CVqLSO3ecrtgxx6usIOUc9_TXuW1XEElA2VlBOoPQQjSVXGKnajRyBTRfZDhxWozWF9qO94A";

struct Listing<'a> {
    id: &'a str,
    title: &'a str,
    price: &'a str,
    specs: &'a str,
    img: &'a str,
    status: ApartmentStatus,
    pet_tag: &'a str,
    pet_icon: &'a str,
    created_at: i64,
}

impl Listing<'_> {
    fn into_apartment(self) -> Apartment {
        let (status_icon, status_color) = self.status.metadata();
        Apartment {
            id: self.id.to_string(),
            title: self.title.to_string(),
            price: self.price.to_string(),
            specs: self.specs.to_string(),
            img: self.img.to_string(),
            status: self.status,
            status_icon: status_icon.to_string(),
            status_color: status_color.to_string(),
            pet_tag: self.pet_tag.to_string(),
            pet_icon: self.pet_icon.to_string(),
            created_at: self.created_at,
            description: None,
        }
    }
}

pub fn apartments() -> Vec<Apartment> {
    vec![
        Listing {
            id: "1",
            title: "The Lofts at River",
            price: "$2,400",
            specs: "2 Bed \u{2022} 2 Bath \u{2022} 1,100 sqft",
            img: LOFTS_IMG,
            status: ApartmentStatus::Touring,
            pet_tag: "Large Dog OK",
            pet_icon: "pets",
            created_at: 1_713_963_600_000,
        }
        .into_apartment(),
        Listing {
            id: "2",
            title: "Greenview Apts",
            price: "$2,600",
            specs: "1 Bed \u{2022} 1 Bath \u{2022} 850 sqft",
            img: GREENVIEW_IMG,
            status: ApartmentStatus::Applied,
            pet_tag: "Golden Friendly",
            pet_icon: "check_circle",
            created_at: 1_713_877_200_000,
        }
        .into_apartment(),
        Listing {
            id: "3",
            title: "Sunnyside Unit 4B",
            price: "$2,350",
            specs: "2 Bed \u{2022} 1 Bath \u{2022} 980 sqft",
            img: SUNNYSIDE_IMG,
            status: ApartmentStatus::Contacted,
            pet_tag: "Pets Allowed",
            pet_icon: "pets",
            created_at: 1_713_790_800_000,
        }
        .into_apartment(),
    ]
}

fn log_entry(
    id: &str,
    time: &str,
    label: &str,
    kind: LogType,
    detail: Option<&str>,
) -> DailyLogEntry {
    DailyLogEntry {
        id: id.to_string(),
        time: time.to_string(),
        label: label.to_string(),
        kind,
        detail: detail.map(str::to_string),
        image: None,
    }
}

pub fn daily_logs() -> Vec<DailyLogEntry> {
    vec![
        log_entry("log-1", "10:45 AM", "Went down for a nap", LogType::Sleep, None),
        log_entry("log-2", "10:15 AM", "Potty: Pee", LogType::Pee, Some("- Backyard")),
        log_entry("log-3", "09:30 AM", "Potty: Poop", LogType::Poop, None),
        log_entry("log-4", "08:00 AM", "Breakfast (1.5 cups)", LogType::Meal, None),
    ]
}

fn milestone(
    id: &str,
    focus_area: &str,
    status: MilestoneStatus,
    recent_progress: &str,
    icon: &str,
    color: MilestoneColor,
) -> Milestone {
    Milestone {
        id: id.to_string(),
        focus_area: focus_area.to_string(),
        status,
        recent_progress: recent_progress.to_string(),
        icon: icon.to_string(),
        color,
        what_to_work_on: None,
        how_to_work_on: None,
    }
}

pub fn milestones() -> Vec<Milestone> {
    vec![
        milestone(
            "1",
            "Potty Training",
            MilestoneStatus::InProgress,
            "No accidents for 2 days",
            "accessibility_new",
            MilestoneColor::Blue,
        ),
        milestone(
            "2",
            "Command: Sit",
            MilestoneStatus::Mastered,
            "Consistent with hand signal",
            "chair",
            MilestoneColor::Purple,
        ),
        milestone(
            "3",
            "Socialization",
            MilestoneStatus::InProgress,
            "Met 3 new people today",
            "groups",
            MilestoneColor::Orange,
        ),
    ]
}

pub fn gallery() -> Vec<GalleryPhoto> {
    Vec::new()
}

fn checklist_item(id: &str, title: &str, content: &str) -> ChecklistItem {
    ChecklistItem {
        id: id.to_string(),
        title: title.to_string(),
        content: content.to_string(),
        completed: false,
    }
}

/// Onboarding checklist for the first days with the puppy.
pub fn checklist() -> Vec<ChecklistItem> {
    vec![
        checklist_item(
            "prep-1",
            "Before Arrival",
            "Setup the crate in the bedroom, puppy-proof the living room (hide cords!), and buy high-value treats.",
        ),
        checklist_item(
            "prep-2",
            "First Night Plan",
            "Place a snuggle puppy toy in the crate. Set alarms for 2 AM and 5 AM potty breaks.",
        ),
        checklist_item(
            "prep-3",
            "Vet & Health",
            "Schedule first wellness exam. Bring vaccination records from breeder.",
        ),
    ]
}
