// Published services and contact details.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Price {
    /// Whole dollars.
    Base(u32),
    Included,
    Surcharge(u32),
    Text(&'static str),
    Custom,
}

impl std::fmt::Display for Price {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Price::Base(amount) => write!(f, "${}", amount),
            Price::Included => f.write_str("Free"),
            Price::Surcharge(amount) => write!(f, "+${}", amount),
            Price::Text(text) => f.write_str(text),
            Price::Custom => f.write_str("Contact us"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServiceOffering {
    pub title: &'static str,
    pub price: Price,
    pub description: &'static str,
}

pub const SERVICES: [ServiceOffering; 9] = [
    ServiceOffering {
        title: "Dog Walking",
        price: Price::Base(19),
        description: "Professional, attentive walks tailored to your dog's needs",
    },
    ServiceOffering {
        title: "Pet Boarding",
        price: Price::Base(40),
        description: "Cozy, home-like environment for overnight stays",
    },
    ServiceOffering {
        title: "House Sitting",
        price: Price::Base(50),
        description: "Dedicated care in your pet's familiar environment",
    },
    ServiceOffering {
        title: "Drop-in Visits",
        price: Price::Base(22),
        description: "30-min ($22) or 1-hour ($35) visits for feeding and play",
    },
    ServiceOffering {
        title: "Pet Day Care",
        price: Price::Base(35),
        description: "Full day of supervised fun and socialization",
    },
    ServiceOffering {
        title: "Photo Updates",
        price: Price::Included,
        description: "Photos of your best friend are included for free",
    },
    ServiceOffering {
        title: "Holiday And Disaster",
        price: Price::Surcharge(8),
        description: "Increased price for Holidays and Disasters",
    },
    ServiceOffering {
        title: "Booking Deposit",
        price: Price::Text("50% of fee"),
        description: "Help secure your spot on the calendar",
    },
    ServiceOffering {
        title: "Emergency Care",
        price: Price::Custom,
        description: "24/7 availability for unexpected situations",
    },
];

pub const CONTACT_EMAIL: &str = "Info@LittlePawsJax.com";
pub const CONTACT_PHONE: &str = "(904) 438-8588";
pub const INSTAGRAM_URL: &str = "https://www.instagram.com/littlepawsjax";
pub const TIKTOK_URL: &str = "https://www.tiktok.com/@littlepawsJAX";
