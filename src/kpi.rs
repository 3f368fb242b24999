// KPI catalogue.
// Static placeholder cards per dashboard view and the red KPI report entries.

use crate::state::DashboardView;

/// Traffic light band of a KPI value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Band {
    Green,
    Yellow,
    Red,
}

/// A card in the KPI grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KpiCard {
    pub id: &'static str,
    pub title: &'static str,
    pub value: &'static str,
    pub band: Band,
}

/// An entry in the red KPI report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RedKpi {
    pub title: &'static str,
    pub value: &'static str,
    pub tooltip: &'static str,
}

const ORGANIZER_CARDS: [KpiCard; 4] = [
    KpiCard {
        id: "teilnehmer",
        title: "Teilnehmer",
        value: "1.240",
        band: Band::Green,
    },
    KpiCard {
        id: "stornierungsquote",
        title: "Stornierungsquote",
        value: "50%",
        band: Band::Red,
    },
    KpiCard {
        id: "auslastung",
        title: "Auslastung",
        value: "82%",
        band: Band::Green,
    },
    KpiCard {
        id: "zufriedenheit",
        title: "Zufriedenheit",
        value: "3,9 / 5",
        band: Band::Yellow,
    },
];

const AUFTRAGGEBER_CARDS: [KpiCard; 4] = [
    KpiCard {
        id: "budgettreue",
        title: "Budgettreue",
        value: "97%",
        band: Band::Green,
    },
    KpiCard {
        id: "kosten_pro_teilnehmer",
        title: "Kosten pro Teilnehmer",
        value: "184 €",
        band: Band::Yellow,
    },
    KpiCard {
        id: "stornierungsquote",
        title: "Stornierungsquote",
        value: "50%",
        band: Band::Red,
    },
    KpiCard {
        id: "weiterempfehlung",
        title: "Weiterempfehlung",
        value: "71%",
        band: Band::Yellow,
    },
];

const TECHNIKER_CARDS: [KpiCard; 4] = [
    KpiCard {
        id: "technik_location",
        title: "Technikkompatibilität (Location)",
        value: "Ø50%",
        band: Band::Red,
    },
    KpiCard {
        id: "technik_format",
        title: "Technikkompatibilität (Format)",
        value: "Ø50%",
        band: Band::Red,
    },
    KpiCard {
        id: "ausfallzeit",
        title: "Ausfallzeit",
        value: "12 min",
        band: Band::Green,
    },
    KpiCard {
        id: "supportfaelle",
        title: "Supportfälle",
        value: "7",
        band: Band::Yellow,
    },
];

/// Cards of a view in their default order.
pub fn cards_for(view: DashboardView) -> &'static [KpiCard] {
    match view {
        DashboardView::Organizer => &ORGANIZER_CARDS,
        DashboardView::Auftraggeber => &AUFTRAGGEBER_CARDS,
        DashboardView::Techniker => &TECHNIKER_CARDS,
    }
}

const RED_KPIS: [RedKpi; 3] = [
    RedKpi {
        title: "Stornierungsquote",
        value: "50%",
        tooltip: "Darstellung einer Kennzahl zum Anteil der stornierten Anmeldungen.\n\n\
                  Interpretationsstütze:\nGrün = <= 15%\nGelb = 16 – 25%\nRot = >= 26%\n\n\
                  Berechnung:\n= (Stornierungen / angemeldete Teilnehmer) *100",
    },
    RedKpi {
        title: "Technikkompatibilität (Location)",
        value: "Ø50%",
        tooltip: "Darstellung einer Kennzahl, die aussagt zu welchem Grad die Technische \
                  Ausstattung passend zur Location war.\n\
                  Interpretationshilfe:\nGrün= >= 95%\nGelb = 94 – 60%\nRot= <= 59%\n\n\
                  Berechnung:\n-> Durchschnitt gewichteter Faktoren in Prozent",
    },
    RedKpi {
        title: "Technikkompatibilität (Format)",
        value: "Ø50%",
        tooltip: "Darstellung einer Kennzahl, die aussagt zu welchem Grad die Technische \
                  Ausstattung passend zum Veranstaltungsformat war.\n\
                  Interpretationshilfe:\nGrün= >= 95%\nGelb = 94 – 60%\nRot= <= 59%\n\n\
                  Berechnung:\n-> Durchschnitt gewichteter Faktoren in Prozent",
    },
];

/// KPIs in the red band, surfaced to senior executives after a commit.
pub fn red_kpis() -> &'static [RedKpi] {
    &RED_KPIS
}
