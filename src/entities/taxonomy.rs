// 🗂️ Merchant Taxonomy - Closed enumerations
// Category, subcategory, channel, scope and risk level as they appear on the wire
//
// Every subcategory belongs to exactly one category:
// - CAFE → FOOD_AND_DRINK
// - E_COMMERCE → SHOPPING
// - WITHDRAWAL → ATM

use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// CATEGORY
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Category {
    Automotive,
    Utilities,
    Transport,
    FoodAndDrink,
    Shopping,
    Entertainment,
    Home,
    Finance,
    Healthcare,
    DigitalServices,
    Education,
    Travel,
    Groceries,
    PersonalCare,
    PetCare,
    SportsAndFitness,
    Insurance,
    GiftsAndDonations,
    FeesAndCharges,
    Government,
    Services,
    Atm,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Automotive => "AUTOMOTIVE",
            Category::Utilities => "UTILITIES",
            Category::Transport => "TRANSPORT",
            Category::FoodAndDrink => "FOOD_AND_DRINK",
            Category::Shopping => "SHOPPING",
            Category::Entertainment => "ENTERTAINMENT",
            Category::Home => "HOME",
            Category::Finance => "FINANCE",
            Category::Healthcare => "HEALTHCARE",
            Category::DigitalServices => "DIGITAL_SERVICES",
            Category::Education => "EDUCATION",
            Category::Travel => "TRAVEL",
            Category::Groceries => "GROCERIES",
            Category::PersonalCare => "PERSONAL_CARE",
            Category::PetCare => "PET_CARE",
            Category::SportsAndFitness => "SPORTS_AND_FITNESS",
            Category::Insurance => "INSURANCE",
            Category::GiftsAndDonations => "GIFTS_AND_DONATIONS",
            Category::FeesAndCharges => "FEES_AND_CHARGES",
            Category::Government => "GOVERNMENT",
            Category::Services => "SERVICES",
            Category::Atm => "ATM",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// SUBCATEGORY
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Subcategory {
    // AUTOMOTIVE
    GasStation,
    EvCharging,
    CarWash,
    AutoRepair,
    PartsAndAccessories,
    Parking,

    // UTILITIES
    Electricity,
    Gas,
    Water,
    Internet,
    Phone,
    Cable,

    // TRANSPORT
    RideSharing,
    Taxi,
    Bus,
    Rail,
    Airline,
    CarRental,
    PublicTransport,

    // FOOD_AND_DRINK
    Cafe,
    FastFood,
    Delivery,
    CasualDining,
    FineDining,
    Bar,
    Bakery,

    // SHOPPING
    ECommerce,
    Marketplace,
    DepartmentStore,
    Electronics,
    Clothing,
    Pharmacy,

    // ENTERTAINMENT
    Streaming,
    Gaming,
    Movies,
    Sports,
    Music,
    Lottery,

    // HOME
    Improvement,
    Furniture,
    Appliances,
    Rent,
    Mortgage,

    // FINANCE
    Banking,
    Investments,
    Loans,
    Transfers,

    // HEALTHCARE
    Hospital,
    Dental,
    Vision,
    MentalHealth,

    // DIGITAL_SERVICES
    Software,
    Cloud,

    // EDUCATION
    Tuition,
    Courses,
    Books,

    // TRAVEL
    Hotels,
    Flights,
    VacationRentals,

    // GROCERIES
    Supermarket,
    Convenience,
    Specialty,

    // PERSONAL_CARE
    Salon,
    Spa,
    Cosmetics,

    // PET_CARE
    Vet,
    PetSupplies,
    Grooming,

    // SPORTS_AND_FITNESS
    Gym,
    Equipment,
    Events,

    // INSURANCE
    AutoInsurance,
    HealthInsurance,
    HomeInsurance,
    LifeInsurance,

    // GIFTS_AND_DONATIONS
    Charity,
    Gifts,

    // FEES_AND_CHARGES
    BankFees,
    ServiceFees,
    LateFees,

    // GOVERNMENT
    Taxes,
    Licenses,
    Fines,

    // SERVICES
    Professional,
    Household,
    Legal,

    // ATM
    Withdrawal,
    Deposit,
}

impl Subcategory {
    /// The category this subcategory belongs to
    pub fn category(&self) -> Category {
        use Subcategory::*;

        match self {
            GasStation | EvCharging | CarWash | AutoRepair | PartsAndAccessories | Parking => {
                Category::Automotive
            }
            Electricity | Gas | Water | Internet | Phone | Cable => Category::Utilities,
            RideSharing | Taxi | Bus | Rail | Airline | CarRental | PublicTransport => {
                Category::Transport
            }
            Cafe | FastFood | Delivery | CasualDining | FineDining | Bar | Bakery => {
                Category::FoodAndDrink
            }
            ECommerce | Marketplace | DepartmentStore | Electronics | Clothing | Pharmacy => {
                Category::Shopping
            }
            Streaming | Gaming | Movies | Sports | Music | Lottery => Category::Entertainment,
            Improvement | Furniture | Appliances | Rent | Mortgage => Category::Home,
            Banking | Investments | Loans | Transfers => Category::Finance,
            Hospital | Dental | Vision | MentalHealth => Category::Healthcare,
            Software | Cloud => Category::DigitalServices,
            Tuition | Courses | Books => Category::Education,
            Hotels | Flights | VacationRentals => Category::Travel,
            Supermarket | Convenience | Specialty => Category::Groceries,
            Salon | Spa | Cosmetics => Category::PersonalCare,
            Vet | PetSupplies | Grooming => Category::PetCare,
            Gym | Equipment | Events => Category::SportsAndFitness,
            AutoInsurance | HealthInsurance | HomeInsurance | LifeInsurance => Category::Insurance,
            Charity | Gifts => Category::GiftsAndDonations,
            BankFees | ServiceFees | LateFees => Category::FeesAndCharges,
            Taxes | Licenses | Fines => Category::Government,
            Professional | Household | Legal => Category::Services,
            Withdrawal | Deposit => Category::Atm,
        }
    }

    pub fn as_str(&self) -> &'static str {
        use Subcategory::*;

        match self {
            GasStation => "GAS_STATION",
            EvCharging => "EV_CHARGING",
            CarWash => "CAR_WASH",
            AutoRepair => "AUTO_REPAIR",
            PartsAndAccessories => "PARTS_AND_ACCESSORIES",
            Parking => "PARKING",
            Electricity => "ELECTRICITY",
            Gas => "GAS",
            Water => "WATER",
            Internet => "INTERNET",
            Phone => "PHONE",
            Cable => "CABLE",
            RideSharing => "RIDE_SHARING",
            Taxi => "TAXI",
            Bus => "BUS",
            Rail => "RAIL",
            Airline => "AIRLINE",
            CarRental => "CAR_RENTAL",
            PublicTransport => "PUBLIC_TRANSPORT",
            Cafe => "CAFE",
            FastFood => "FAST_FOOD",
            Delivery => "DELIVERY",
            CasualDining => "CASUAL_DINING",
            FineDining => "FINE_DINING",
            Bar => "BAR",
            Bakery => "BAKERY",
            ECommerce => "E_COMMERCE",
            Marketplace => "MARKETPLACE",
            DepartmentStore => "DEPARTMENT_STORE",
            Electronics => "ELECTRONICS",
            Clothing => "CLOTHING",
            Pharmacy => "PHARMACY",
            Streaming => "STREAMING",
            Gaming => "GAMING",
            Movies => "MOVIES",
            Sports => "SPORTS",
            Music => "MUSIC",
            Lottery => "LOTTERY",
            Improvement => "IMPROVEMENT",
            Furniture => "FURNITURE",
            Appliances => "APPLIANCES",
            Rent => "RENT",
            Mortgage => "MORTGAGE",
            Banking => "BANKING",
            Investments => "INVESTMENTS",
            Loans => "LOANS",
            Transfers => "TRANSFERS",
            Hospital => "HOSPITAL",
            Dental => "DENTAL",
            Vision => "VISION",
            MentalHealth => "MENTAL_HEALTH",
            Software => "SOFTWARE",
            Cloud => "CLOUD",
            Tuition => "TUITION",
            Courses => "COURSES",
            Books => "BOOKS",
            Hotels => "HOTELS",
            Flights => "FLIGHTS",
            VacationRentals => "VACATION_RENTALS",
            Supermarket => "SUPERMARKET",
            Convenience => "CONVENIENCE",
            Specialty => "SPECIALTY",
            Salon => "SALON",
            Spa => "SPA",
            Cosmetics => "COSMETICS",
            Vet => "VET",
            PetSupplies => "PET_SUPPLIES",
            Grooming => "GROOMING",
            Gym => "GYM",
            Equipment => "EQUIPMENT",
            Events => "EVENTS",
            AutoInsurance => "AUTO_INSURANCE",
            HealthInsurance => "HEALTH_INSURANCE",
            HomeInsurance => "HOME_INSURANCE",
            LifeInsurance => "LIFE_INSURANCE",
            Charity => "CHARITY",
            Gifts => "GIFTS",
            BankFees => "BANK_FEES",
            ServiceFees => "SERVICE_FEES",
            LateFees => "LATE_FEES",
            Taxes => "TAXES",
            Licenses => "LICENSES",
            Fines => "FINES",
            Professional => "PROFESSIONAL",
            Household => "HOUSEHOLD",
            Legal => "LEGAL",
            Withdrawal => "WITHDRAWAL",
            Deposit => "DEPOSIT",
        }
    }
}

impl fmt::Display for Subcategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// CHANNEL / SCOPE / RISK
// ============================================================================

/// Where the merchant transacts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MerchantChannel {
    Physical,
    Online,
    Hybrid,
}

impl MerchantChannel {
    pub fn as_str(&self) -> &'static str {
        match self {
            MerchantChannel::Physical => "PHYSICAL",
            MerchantChannel::Online => "ONLINE",
            MerchantChannel::Hybrid => "HYBRID",
        }
    }
}

/// Geographic reach of the merchant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MerchantScope {
    Local,
    National,
    Global,
}

impl MerchantScope {
    pub fn as_str(&self) -> &'static str {
        match self {
            MerchantScope::Local => "LOCAL",
            MerchantScope::National => "NATIONAL",
            MerchantScope::Global => "GLOBAL",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "LOW",
            RiskLevel::Medium => "MEDIUM",
            RiskLevel::High => "HIGH",
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subcategory_belongs_to_category() {
        assert_eq!(Subcategory::Cafe.category(), Category::FoodAndDrink);
        assert_eq!(Subcategory::ECommerce.category(), Category::Shopping);
        assert_eq!(Subcategory::Streaming.category(), Category::Entertainment);
        assert_eq!(Subcategory::Cloud.category(), Category::DigitalServices);
        assert_eq!(Subcategory::Withdrawal.category(), Category::Atm);
        assert_eq!(Subcategory::Gas.category(), Category::Utilities);
        assert_eq!(Subcategory::GasStation.category(), Category::Automotive);
    }

    #[test]
    fn test_wire_names_match_serde() {
        let json = serde_json::to_string(&Subcategory::ECommerce).unwrap();
        assert_eq!(json, "\"E_COMMERCE\"");
        assert_eq!(Subcategory::ECommerce.as_str(), "E_COMMERCE");

        let json = serde_json::to_string(&Category::GiftsAndDonations).unwrap();
        assert_eq!(json, format!("\"{}\"", Category::GiftsAndDonations.as_str()));

        let parsed: Subcategory = serde_json::from_str("\"PARTS_AND_ACCESSORIES\"").unwrap();
        assert_eq!(parsed, Subcategory::PartsAndAccessories);
    }

    #[test]
    fn test_channel_scope_risk_round_trip_names() {
        let channel: MerchantChannel = serde_json::from_str("\"HYBRID\"").unwrap();
        assert_eq!(channel, MerchantChannel::Hybrid);
        assert_eq!(channel.as_str(), "HYBRID");

        let scope: MerchantScope = serde_json::from_str("\"NATIONAL\"").unwrap();
        assert_eq!(scope.as_str(), "NATIONAL");

        let risk: RiskLevel = serde_json::from_str("\"MEDIUM\"").unwrap();
        assert_eq!(risk.as_str(), "MEDIUM");
    }

    #[test]
    fn test_unknown_enum_value_rejected() {
        assert!(serde_json::from_str::<Category>("\"SPACE_TRAVEL\"").is_err());
        assert!(serde_json::from_str::<RiskLevel>("\"low\"").is_err());
    }
}
