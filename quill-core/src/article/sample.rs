//! Built-in articles used by `quill template`, `quill publish` and `quill check`

use super::{ArticlePayload, Category};

const SAMPLE_CONTENT_EN: &str = r#"# The Power of Consistency in Investing

When it comes to building wealth, consistency beats timing every single time.

## The Math Behind Compound Interest

Here's what happens when you invest €100 every month at an average 7% annual return:

[chart:line title="€100/month at 7%" labels="10y,20y,30y" datasets='[{"label":"Portfolio","data":[17308,52093,122709]}]' height="300" currency="€" /]

## The Simple Strategy

1. Set up automatic monthly investments
2. Choose low-cost index funds
3. Ignore the daily noise
4. Stay invested for decades

Remember: time in the market beats timing the market.
"#;

const SAMPLE_CONTENT_IT: &str = r#"# Il Potere della Costanza negli Investimenti

Quando si tratta di costruire ricchezza, la costanza batte il timing ogni singola volta.

## La Matematica Dell'Interesse Composto

Ecco cosa succede quando investi €100 ogni mese con un rendimento medio annuo del 7%:

[chart:line title="€100/mese al 7%" labels="10a,20a,30a" datasets='[{"label":"Portafoglio","data":[17308,52093,122709]}]' height="300" currency="€" /]

## La Strategia Semplice

1. Imposta investimenti mensili automatici
2. Scegli fondi indicizzati a basso costo
3. Ignora il rumore quotidiano
4. Rimani investito per decenni

Ricorda: il tempo nel mercato batte il timing del mercato.
"#;

const SAMPLE_CONTENT_ES: &str = r#"# El Poder de la Consistencia en las Inversiones

Cuando se trata de construir riqueza, la consistencia supera al timing cada vez.

## Las Matemáticas del Interés Compuesto

Esto es lo que sucede cuando inviertes €100 cada mes con un rendimiento promedio anual del 7%:

[chart:line title="€100/mes al 7%" labels="10a,20a,30a" datasets='[{"label":"Cartera","data":[17308,52093,122709]}]' height="300" currency="€" /]

## La Estrategia Simple

1. Configura inversiones mensuales automáticas
2. Elige fondos indexados de bajo costo
3. Ignora el ruido diario
4. Mantente invertido durante décadas

Recuerda: el tiempo en el mercado supera al timing del mercado.
"#;

impl ArticlePayload {
    /// A complete example article
    pub fn sample() -> Self {
        Self {
            title_en: "The Compound Effect of Consistent Investing".to_string(),
            title_it: "L'Effetto Composto degli Investimenti Costanti".to_string(),
            title_es: "El Efecto Compuesto de las Inversiones Constantes".to_string(),
            excerpt_en: "Why investing €100 monthly beats trying to time the market. \
                         Discover the power of consistency and let compounding do the work."
                .to_string(),
            excerpt_it: "Perché investire €100 al mese batte il tentativo di cronometrare \
                         il mercato. Scopri il potere della costanza."
                .to_string(),
            excerpt_es: "Por qué invertir €100 mensuales supera intentar cronometrar el \
                         mercado. Descubre el poder de la consistencia."
                .to_string(),
            content_en: SAMPLE_CONTENT_EN.to_string(),
            content_it: SAMPLE_CONTENT_IT.to_string(),
            content_es: SAMPLE_CONTENT_ES.to_string(),
            category: Category::Investing.to_string(),
            tags: ["investing", "compound-interest", "passive-income", "long-term", "etf"]
                .iter()
                .map(|t| t.to_string())
                .collect(),
            cover_image: Some(
                "https://images.unsplash.com/photo-1579621970563-ebec7560ff3e?w=1200&q=80"
                    .to_string(),
            ),
        }
    }

    /// Small article used to probe the publish endpoint
    pub fn connection_test() -> Self {
        Self {
            title_en: "Test Connection Article".to_string(),
            title_it: "Articolo di Test Connessione".to_string(),
            title_es: "Artículo de Prueba de Conexión".to_string(),
            excerpt_en: "This is a test article to verify the agent can connect to the website API."
                .to_string(),
            excerpt_it: "Questo è un articolo di test per verificare che l'agente possa connettersi all'API del sito."
                .to_string(),
            excerpt_es: "Este es un artículo de prueba para verificar que el agente pueda conectarse a la API del sitio."
                .to_string(),
            content_en: "# Test Connection\n\nThis article was created to test the connection \
                         between the agent and the website."
                .to_string(),
            content_it: "# Test Connessione\n\nQuesto articolo è stato creato per testare la \
                         connessione tra l'agente e il sito web."
                .to_string(),
            content_es: "# Prueba de Conexión\n\nEste artículo fue creado para probar la \
                         conexión entre el agente y el sitio web."
                .to_string(),
            category: Category::Investing.to_string(),
            tags: vec!["test".to_string(), "connection".to_string()],
            cover_image: None,
        }
    }
}
