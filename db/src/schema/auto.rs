table! {
    #[sql_name = "Details"]
    details (rowid) {
        rowid -> Integer,
        #[sql_name = "Description"]
        description -> Text,
        #[sql_name = "Abbreviation"]
        abbreviation -> Text,
        #[sql_name = "Comments"]
        comments -> Text,
        #[sql_name = "Version"]
        version -> Integer,
        #[sql_name = "Font"]
        font -> Text,
        #[sql_name = "RightToLeft"]
        right_to_left -> Bool,
        #[sql_name = "OT"]
        ot -> Bool,
        #[sql_name = "NT"]
        nt -> Bool,
        #[sql_name = "Apocrypha"]
        apocrypha -> Bool,
        #[sql_name = "Strong"]
        strong -> Bool,
    }
}

table! {
    #[sql_name = "Bible"]
    bible (book, chapter, verse) {
        #[sql_name = "Book"]
        book -> Integer,
        #[sql_name = "Chapter"]
        chapter -> Integer,
        #[sql_name = "Verse"]
        verse -> Integer,
        #[sql_name = "Scripture"]
        scripture -> Text,
    }
}
