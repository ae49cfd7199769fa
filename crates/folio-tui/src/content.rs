//! Static portfolio copy rendered above the contact form.

pub struct Section {
    pub title: &'static str,
    pub lead: &'static str,
    pub paragraphs: &'static [&'static str],
    pub cards: &'static [Card],
}

pub struct Card {
    pub title: &'static str,
    pub text: &'static str,
    pub tags: &'static [&'static str],
    pub links: &'static [&'static str],
}

pub const OWNER: &str = "Kyle Sabatin";
pub const ROLE: &str = "Software Developer";
pub const TAGLINE: &str = "I create beautiful, functional, and user-friendly digital experiences that bring ideas to life.";

pub const SECTIONS: &[Section] = &[
    Section {
        title: "About Me",
        lead: "",
        paragraphs: &[
            "A software developer focused on crafting clean, reliable, and user-centered digital experiences, turning complex problems into simple, intuitive interfaces.",
            "Outside of work: exploring design trends, refining UI details, and building side projects that sharpen the craft.",
            "Projects on GitHub: github.com/dgnk1",
        ],
        cards: &[],
    },
    Section {
        title: "Skills & Expertise",
        lead: "Technical skills and creative abilities to bring projects to life.",
        paragraphs: &[],
        cards: &[
            Card {
                title: "Programming",
                text: "Python, Java, C, C++, Dart, JavaScript",
                tags: &[],
                links: &[],
            },
            Card {
                title: "Frameworks & Libraries",
                text: "Flutter, React.js, Django",
                tags: &[],
                links: &[],
            },
            Card {
                title: "Web Technologies",
                text: "HTML, CSS",
                tags: &[],
                links: &[],
            },
            Card {
                title: "Responsive Design",
                text: "Mobile-first approach, cross-browser compatibility",
                tags: &[],
                links: &[],
            },
            Card {
                title: "Tools & Technologies",
                text: "Git, UI/UX design tools, hardware assembly and troubleshooting",
                tags: &[],
                links: &[],
            },
            Card {
                title: "Specializations",
                text: "Mobile application development, front-end web development",
                tags: &[],
                links: &[],
            },
        ],
    },
    Section {
        title: "Featured Projects",
        lead: "A selection of recent work and passion projects.",
        paragraphs: &[],
        cards: &[
            Card {
                title: "KPC Store",
                text: "A clean storefront layout with intuitive navigation, product highlights, and a streamlined shopping experience.",
                tags: &["HTML", "CSS", "JavaScript"],
                links: &["https://github.com/DgnK1/KPC-Store", "https://kpc-store.vercel.app/"],
            },
            Card {
                title: "TTV Web",
                text: "A blog website for main battle tank news from around the world, with interactive pages and readable posts.",
                tags: &["HTML", "CSS", "JavaScript"],
                links: &["https://github.com/DgnK1/TTV", "https://ttv-kappa.vercel.app/"],
            },
            Card {
                title: "Soaris Mobile App",
                text: "A mobile-first product experience designed for drone-assisted agricultural monitoring.",
                tags: &["Flutter", "Dart"],
                links: &["https://github.com/DgnK1/autonomousuav"],
            },
        ],
    },
];
