// Translation tables, one flat key/value list per language

use super::Locale;

pub(super) fn table(locale: Locale) -> &'static [(&'static str, &'static str)] {
    match locale {
        Locale::En => EN,
        Locale::De => DE,
        Locale::Es => ES,
    }
}

const EN: &[(&str, &str)] = &[
    ("title", "Rick and Morty Universe"),
    ("subtitle", "Explore characters from across the multiverse"),
    ("filters.title", "Filters & Sorting"),
    ("filters.status", "Status"),
    ("filters.species", "Species"),
    ("filters.all", "All"),
    ("filters.species_placeholder", "Human, Alien, etc."),
    ("status.alive", "Alive"),
    ("status.dead", "Dead"),
    ("status.unknown", "Unknown"),
    ("sorting.title", "Sort By"),
    ("sorting.name", "Name"),
    ("sorting.origin", "Origin"),
    ("character.species", "Species"),
    ("character.gender", "Gender"),
    ("character.origin", "Origin"),
    ("character.status", "Status"),
    ("gender.female", "Female"),
    ("gender.male", "Male"),
    ("gender.genderless", "Genderless"),
    ("gender.unknown", "Unknown"),
    ("loading", "Loading..."),
    ("error", "Error"),
    ("end_of_list", "No more characters"),
    ("no_results", "No characters match these filters"),
    ("language", "Language"),
    ("characters", "Characters"),
    ("copied", "Copied to clipboard"),
    ("copy_failed", "Failed to copy"),
    ("help.title", "Keyboard Shortcuts"),
    ("help.navigate", "Move selection"),
    ("help.status", "Cycle status filter"),
    ("help.species", "Cycle species preset"),
    ("help.species_edit", "Type a species filter"),
    ("help.sort", "Toggle sort (name / origin)"),
    ("help.language", "Switch language"),
    ("help.retry", "Retry after an error"),
    ("help.details", "Show character details"),
    ("help.copy", "Copy character as JSON"),
    ("help.logs", "Toggle log panel"),
    ("help.quit", "Quit"),
];

const DE: &[(&str, &str)] = &[
    ("title", "Rick und Morty Universum"),
    ("subtitle", "Entdecke Charaktere aus dem Multiversum"),
    ("filters.title", "Filter & Sortierung"),
    ("filters.status", "Status"),
    ("filters.species", "Spezies"),
    ("filters.all", "Alle"),
    ("filters.species_placeholder", "Mensch, Alien usw."),
    ("status.alive", "Lebendig"),
    ("status.dead", "Tot"),
    ("status.unknown", "Unbekannt"),
    ("sorting.title", "Sortieren nach"),
    ("sorting.name", "Name"),
    ("sorting.origin", "Herkunft"),
    ("character.species", "Spezies"),
    ("character.gender", "Geschlecht"),
    ("character.origin", "Herkunft"),
    ("character.status", "Status"),
    ("gender.female", "Weiblich"),
    ("gender.male", "Männlich"),
    ("gender.genderless", "Geschlechtslos"),
    ("gender.unknown", "Unbekannt"),
    ("loading", "Wird geladen..."),
    ("error", "Fehler"),
    ("end_of_list", "Keine weiteren Charaktere"),
    ("no_results", "Keine Charaktere für diese Filter"),
    ("language", "Sprache"),
    ("characters", "Charaktere"),
    ("copied", "In die Zwischenablage kopiert"),
    ("copy_failed", "Kopieren fehlgeschlagen"),
    ("help.title", "Tastenkürzel"),
    ("help.navigate", "Auswahl bewegen"),
    ("help.status", "Statusfilter wechseln"),
    ("help.species", "Spezies-Vorgabe wechseln"),
    ("help.species_edit", "Spezies eingeben"),
    ("help.sort", "Sortierung wechseln (Name / Herkunft)"),
    ("help.language", "Sprache wechseln"),
    ("help.retry", "Nach Fehler erneut versuchen"),
    ("help.details", "Details anzeigen"),
    ("help.copy", "Charakter als JSON kopieren"),
    ("help.logs", "Protokoll ein-/ausblenden"),
    ("help.quit", "Beenden"),
];

const ES: &[(&str, &str)] = &[
    ("title", "Universo de Rick y Morty"),
    ("subtitle", "Explora personajes del multiverso"),
    ("filters.title", "Filtros y orden"),
    ("filters.status", "Estado"),
    ("filters.species", "Especie"),
    ("filters.all", "Todos"),
    ("filters.species_placeholder", "Humano, Alien, etc."),
    ("status.alive", "Vivo"),
    ("status.dead", "Muerto"),
    ("status.unknown", "Desconocido"),
    ("sorting.title", "Ordenar por"),
    ("sorting.name", "Nombre"),
    ("sorting.origin", "Origen"),
    ("character.species", "Especie"),
    ("character.gender", "Género"),
    ("character.origin", "Origen"),
    ("character.status", "Estado"),
    ("gender.female", "Femenino"),
    ("gender.male", "Masculino"),
    ("gender.genderless", "Sin género"),
    ("gender.unknown", "Desconocido"),
    ("loading", "Cargando..."),
    ("error", "Error"),
    ("end_of_list", "No hay más personajes"),
    ("no_results", "Ningún personaje coincide con estos filtros"),
    ("language", "Idioma"),
    ("characters", "Personajes"),
    ("copied", "Copiado al portapapeles"),
    ("copy_failed", "No se pudo copiar"),
    ("help.title", "Atajos de teclado"),
    ("help.navigate", "Mover selección"),
    ("help.status", "Cambiar filtro de estado"),
    ("help.species", "Cambiar especie predefinida"),
    ("help.species_edit", "Escribir una especie"),
    ("help.sort", "Cambiar orden (nombre / origen)"),
    ("help.language", "Cambiar idioma"),
    ("help.retry", "Reintentar tras un error"),
    ("help.details", "Ver detalles del personaje"),
    ("help.copy", "Copiar personaje como JSON"),
    ("help.logs", "Mostrar/ocultar registro"),
    ("help.quit", "Salir"),
];
