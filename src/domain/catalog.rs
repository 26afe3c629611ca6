//! 靜態目錄：服務、車型、加購項目與可預約時段。

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Service {
    pub id: &'static str,
    pub name: &'static str,
    pub duration_label: &'static str,
    pub price_label: &'static str,
    pub description: &'static str,
    pub has_addons: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Addon {
    pub id: &'static str,
    pub name: &'static str,
    pub price_label: &'static str,
    pub description: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VehicleType {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
}

/// 某車種底下的一個廠牌。`years` 不可為空；`models` 不保證排序。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MakeEntry {
    pub make: &'static str,
    pub years: &'static [i32],
    pub models: &'static [&'static str],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VehicleCatalogEntry {
    pub vehicle_type: &'static str,
    pub makes: &'static [MakeEntry],
}

pub const SERVICES: &[Service] = &[
    Service {
        id: "basic",
        name: "Basic Interior Detailing",
        duration_label: "2.5-4 hrs",
        price_label: "$80",
        description: "Basic cleaning includes entire car vacuuming, cleaning of all hard plastics and leather.",
        has_addons: true,
    },
    Service {
        id: "premium",
        name: "Full Interior Detailing",
        duration_label: "4-6 hrs",
        price_label: "$110",
        description: "Complete interior cleaning getting in all hard to reach spots.",
        has_addons: true,
    },
    Service {
        id: "basic-in-out",
        name: "Basic Inside & Outside",
        duration_label: "90 min",
        price_label: "$150",
        description: "Basic interior and exterior detailing",
        has_addons: true,
    },
    Service {
        id: "premium-in-out",
        name: "Premium In & Out Detailing",
        duration_label: "120 min",
        price_label: "$125",
        description: "Premium interior and exterior detailing",
        has_addons: true,
    },
    Service {
        id: "consultation",
        name: "Consultation",
        duration_label: "30 min",
        price_label: "$50",
        description: "Initial consultation and assessment",
        has_addons: false,
    },
];

pub const VEHICLE_TYPES: &[VehicleType] = &[
    VehicleType {
        id: "car",
        name: "Car",
        description: "Sedan, Coupe, Hatchback, Wagon",
    },
    VehicleType {
        id: "suv",
        name: "SUV / Crossover",
        description: "Sport Utility Vehicles and Crossovers",
    },
    VehicleType {
        id: "truck",
        name: "Truck",
        description: "Pickup Trucks and Commercial Vehicles",
    },
    VehicleType {
        id: "van",
        name: "Van / Minivan",
        description: "Passenger and Cargo Vans",
    },
    VehicleType {
        id: "motorcycle",
        name: "Motorcycle",
        description: "Motorcycles, Scooters, ATVs",
    },
];

pub const VEHICLE_CATALOG: &[VehicleCatalogEntry] = &[
    VehicleCatalogEntry {
        vehicle_type: "car",
        makes: &[
            MakeEntry {
                make: "Toyota",
                years: &[2020, 2021, 2022],
                models: &["Corolla", "Camry", "Prius", "Avalon"],
            },
            MakeEntry {
                make: "Honda",
                years: &[2019, 2020, 2021],
                models: &["Civic", "Accord", "Insight"],
            },
        ],
    },
    VehicleCatalogEntry {
        vehicle_type: "suv",
        makes: &[
            MakeEntry {
                make: "Ford",
                years: &[2020, 2021],
                models: &["Explorer", "Escape", "Edge"],
            },
            MakeEntry {
                make: "Chevrolet",
                years: &[2019, 2020],
                models: &["Tahoe", "Equinox", "Traverse"],
            },
        ],
    },
    VehicleCatalogEntry {
        vehicle_type: "truck",
        makes: &[
            MakeEntry {
                make: "Ford",
                years: &[2020, 2021],
                models: &["F-150", "Ranger", "F-250"],
            },
            MakeEntry {
                make: "Chevrolet",
                years: &[2019, 2020],
                models: &["Silverado 1500", "Colorado"],
            },
        ],
    },
    VehicleCatalogEntry {
        vehicle_type: "van",
        makes: &[
            MakeEntry {
                make: "Ford",
                years: &[2020, 2021],
                models: &["Transit", "Transit Connect"],
            },
            MakeEntry {
                make: "Chevrolet",
                years: &[2019, 2020],
                models: &["Express"],
            },
        ],
    },
    VehicleCatalogEntry {
        vehicle_type: "motorcycle",
        makes: &[
            MakeEntry {
                make: "Yamaha",
                years: &[2020, 2021],
                models: &["MT-07", "YZF-R3", "Bolt"],
            },
            MakeEntry {
                make: "Honda",
                years: &[2019, 2020],
                models: &["Rebel 500", "CBR500R", "Gold Wing"],
            },
        ],
    },
];

pub const ADDONS: &[Addon] = &[
    Addon {
        id: "express",
        name: "Express Treatment",
        price_label: "$25",
        description: "Quick add-on treatment for enhanced results",
    },
    Addon {
        id: "aromatherapy",
        name: "Aromatherapy",
        price_label: "$15",
        description: "Relaxing essential oils for a calming experience",
    },
    Addon {
        id: "extended-consult",
        name: "Extended Consultation",
        price_label: "$30",
        description: "Additional one-on-one time with specialist",
    },
    Addon {
        id: "premium-products",
        name: "Premium Products",
        price_label: "$40",
        description: "Upgrade to premium-grade products",
    },
];

/// 9:00 AM 到 5:00 PM，每 30 分鐘一格
pub const TIME_SLOTS: &[&str] = &[
    "9:00 AM", "9:30 AM", "10:00 AM", "10:30 AM", "11:00 AM", "11:30 AM", "12:00 PM", "12:30 PM",
    "1:00 PM", "1:30 PM", "2:00 PM", "2:30 PM", "3:00 PM", "3:30 PM", "4:00 PM", "4:30 PM",
    "5:00 PM",
];

pub fn find_service(name: &str) -> Option<&'static Service> {
    SERVICES.iter().find(|s| s.name == name)
}

pub fn find_addon(name: &str) -> Option<&'static Addon> {
    ADDONS.iter().find(|a| a.name == name)
}

pub fn find_vehicle_type(id: &str) -> Option<&'static VehicleType> {
    VEHICLE_TYPES.iter().find(|t| t.id == id)
}

pub fn makes_for_type(vehicle_type: &str) -> &'static [MakeEntry] {
    VEHICLE_CATALOG
        .iter()
        .find(|entry| entry.vehicle_type == vehicle_type)
        .map(|entry| entry.makes)
        .unwrap_or(&[])
}

pub fn find_make(vehicle_type: &str, make: &str) -> Option<&'static MakeEntry> {
    makes_for_type(vehicle_type).iter().find(|m| m.make == make)
}

pub fn is_time_slot(slot: &str) -> bool {
    TIME_SLOTS.contains(&slot)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_make_has_years() {
        for entry in VEHICLE_CATALOG {
            assert!(find_vehicle_type(entry.vehicle_type).is_some());
            for make in entry.makes {
                assert!(!make.years.is_empty(), "{} has no years", make.make);
                assert!(!make.models.is_empty(), "{} has no models", make.make);
            }
        }
    }

    #[test]
    fn test_lookup_helpers() {
        assert!(find_service("Basic Interior Detailing").unwrap().has_addons);
        assert!(!find_service("Consultation").unwrap().has_addons);
        assert!(find_service("Oil Change").is_none());
        assert_eq!(find_make("car", "Toyota").unwrap().years, &[2020, 2021, 2022]);
        assert!(find_make("motorcycle", "Toyota").is_none());
        assert!(makes_for_type("boat").is_empty());
        assert!(find_addon("Aromatherapy").is_some());
    }

    #[test]
    fn test_time_slots_cover_business_hours() {
        assert_eq!(TIME_SLOTS.len(), 17);
        assert_eq!(TIME_SLOTS.first(), Some(&"9:00 AM"));
        assert_eq!(TIME_SLOTS.last(), Some(&"5:00 PM"));
        assert!(is_time_slot("2:30 PM"));
        assert!(!is_time_slot("5:30 PM"));
    }
}
