//! Address Directory: the closed division → district → city hierarchy used
//! to validate shipping addresses.
//!
//! The data is static and read-only. Lookups never fail; unknown keys yield
//! empty lists. Names are matched exactly as listed here.

type District = (&'static str, &'static [&'static str]);
type Division = (&'static str, &'static [District]);

/// Reason a (division, district, city) triple is not in the directory.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DirectoryError {
    #[error("unknown division")]
    UnknownDivision,
    #[error("unknown district for division")]
    UnknownDistrict,
    #[error("unknown city for district")]
    UnknownCity,
}

/// All division names, in directory order.
pub fn list_divisions() -> Vec<&'static str> {
    DIRECTORY.iter().map(|(name, _)| *name).collect()
}

/// District names of `division`; empty for an unknown division.
pub fn list_districts(division: &str) -> Vec<&'static str> {
    find_division(division)
        .map(|districts| districts.iter().map(|(name, _)| *name).collect())
        .unwrap_or_default()
}

/// City names of `district` within `division`; empty if either key is unknown.
pub fn list_cities(division: &str, district: &str) -> Vec<&'static str> {
    find_division(division)
        .and_then(|districts| find_district(districts, district))
        .map(|cities| cities.to_vec())
        .unwrap_or_default()
}

/// Check a triple level by level, reporting the first level that does not match.
pub fn validate(division: &str, district: &str, city: &str) -> Result<(), DirectoryError> {
    let districts = find_division(division).ok_or(DirectoryError::UnknownDivision)?;
    let cities = find_district(districts, district).ok_or(DirectoryError::UnknownDistrict)?;
    if cities.contains(&city) {
        Ok(())
    } else {
        Err(DirectoryError::UnknownCity)
    }
}

fn find_division(division: &str) -> Option<&'static [District]> {
    DIRECTORY
        .iter()
        .find(|(name, _)| *name == division)
        .map(|(_, districts)| *districts)
}

fn find_district(
    districts: &'static [District],
    district: &str,
) -> Option<&'static [&'static str]> {
    districts
        .iter()
        .find(|(name, _)| *name == district)
        .map(|(_, cities)| *cities)
}

static DIRECTORY: &[Division] = &[
    (
        "Barishal",
        &[
            ("Barguna", &["Amtali", "Bamna", "Barguna Sadar", "Betagi", "Patharghata", "Taltali"]),
            (
                "Barishal",
                &[
                    "Agailjhara",
                    "Babuganj",
                    "Bakerganj",
                    "Banaripara",
                    "Barishal Sadar",
                    "Gournadi",
                    "Mehendiganj",
                    "Muladi",
                    "Wazirpur",
                ],
            ),
            (
                "Bhola",
                &[
                    "Bhola Sadar",
                    "Burhanuddin",
                    "Char Fasson",
                    "Daulatkhan",
                    "Lalmohan",
                    "Manpura",
                    "Tazumuddin",
                ],
            ),
            ("Jhalokati", &["Jhalokati Sadar", "Kathalia", "Nalchity", "Rajapur"]),
            (
                "Patuakhali",
                &["Bauphal", "Dashmina", "Galachipa", "Kalapara", "Mirzaganj", "Patuakhali Sadar"],
            ),
            (
                "Pirojpur",
                &["Bhandaria", "Kawkhali", "Mathbaria", "Nazirpur", "Nesarabad", "Pirojpur Sadar"],
            ),
        ],
    ),
    (
        "Chattogram",
        &[
            (
                "Bandarban",
                &[
                    "Alikadam",
                    "Bandarban Sadar",
                    "Lama",
                    "Naikhongchhari",
                    "Rowangchhari",
                    "Ruma",
                    "Thanchi",
                ],
            ),
            (
                "Brahmanbaria",
                &[
                    "Akhaura",
                    "Ashuganj",
                    "Bancharampur",
                    "Brahmanbaria Sadar",
                    "Kasba",
                    "Nabinagar",
                    "Nasirnagar",
                    "Sarail",
                ],
            ),
            (
                "Chandpur",
                &[
                    "Chandpur Sadar",
                    "Faridganj",
                    "Haimchar",
                    "Haziganj",
                    "Kachua",
                    "Matlab Dakshin",
                    "Matlab Uttar",
                    "Shahrasti",
                ],
            ),
            (
                "Chattogram",
                &[
                    "Anwara",
                    "Banshkhali",
                    "Boalkhali",
                    "Chandanaish",
                    "Fatikchhari",
                    "Hathazari",
                    "Lohagara",
                    "Mirsharai",
                    "Patiya",
                    "Rangunia",
                    "Raozan",
                    "Sandwip",
                    "Satkania",
                    "Sitakunda",
                ],
            ),
            (
                "Cox's Bazar",
                &[
                    "Chakaria",
                    "Cox's Bazar Sadar",
                    "Kutubdia",
                    "Maheshkhali",
                    "Pekua",
                    "Ramu",
                    "Teknaf",
                    "Ukhia",
                ],
            ),
            (
                "Cumilla",
                &[
                    "Barura",
                    "Brahmanpara",
                    "Burichang",
                    "Chandina",
                    "Chauddagram",
                    "Cumilla Sadar",
                    "Daudkandi",
                    "Debidwar",
                    "Homna",
                    "Laksam",
                    "Muradnagar",
                ],
            ),
            (
                "Feni",
                &["Chhagalnaiya", "Daganbhuiyan", "Feni Sadar", "Fulgazi", "Parshuram", "Sonagazi"],
            ),
            (
                "Khagrachhari",
                &[
                    "Dighinala",
                    "Khagrachhari Sadar",
                    "Lakshmichhari",
                    "Mahalchhari",
                    "Manikchhari",
                    "Matiranga",
                    "Panchhari",
                    "Ramgarh",
                ],
            ),
            ("Lakshmipur", &["Kamalnagar", "Lakshmipur Sadar", "Raipur", "Ramganj", "Ramgati"]),
            (
                "Noakhali",
                &[
                    "Begumganj",
                    "Chatkhil",
                    "Companiganj",
                    "Hatiya",
                    "Kabirhat",
                    "Noakhali Sadar",
                    "Senbagh",
                    "Sonaimuri",
                    "Subarnachar",
                ],
            ),
            (
                "Rangamati",
                &[
                    "Baghaichhari",
                    "Barkal",
                    "Kaptai",
                    "Kawkhali",
                    "Langadu",
                    "Rajasthali",
                    "Rangamati Sadar",
                ],
            ),
        ],
    ),
    (
        "Dhaka",
        &[
            (
                "Dhaka",
                &[
                    "Dhamrai",
                    "Dhanmondi",
                    "Dohar",
                    "Gulshan",
                    "Keraniganj",
                    "Mirpur",
                    "Mohammadpur",
                    "Motijheel",
                    "Nawabganj",
                    "Savar",
                    "Uttara",
                ],
            ),
            (
                "Faridpur",
                &[
                    "Alfadanga",
                    "Bhanga",
                    "Boalmari",
                    "Charbhadrasan",
                    "Faridpur Sadar",
                    "Madhukhali",
                    "Nagarkanda",
                    "Sadarpur",
                    "Saltha",
                ],
            ),
            ("Gazipur", &["Gazipur Sadar", "Kaliakair", "Kaliganj", "Kapasia", "Sreepur"]),
            (
                "Gopalganj",
                &["Gopalganj Sadar", "Kashiani", "Kotalipara", "Muksudpur", "Tungipara"],
            ),
            (
                "Kishoreganj",
                &[
                    "Austagram",
                    "Bajitpur",
                    "Bhairab",
                    "Hossainpur",
                    "Itna",
                    "Karimganj",
                    "Katiadi",
                    "Kishoreganj Sadar",
                    "Kuliarchar",
                    "Mithamain",
                    "Nikli",
                    "Pakundia",
                    "Tarail",
                ],
            ),
            ("Madaripur", &["Kalkini", "Madaripur Sadar", "Rajoir", "Shibchar"]),
            (
                "Manikganj",
                &[
                    "Daulatpur",
                    "Ghior",
                    "Harirampur",
                    "Manikganj Sadar",
                    "Saturia",
                    "Shibalaya",
                    "Singair",
                ],
            ),
            (
                "Munshiganj",
                &["Gazaria", "Lohajang", "Munshiganj Sadar", "Sirajdikhan", "Sreenagar", "Tongibari"],
            ),
            (
                "Narayanganj",
                &["Araihazar", "Bandar", "Narayanganj Sadar", "Rupganj", "Sonargaon"],
            ),
            (
                "Narsingdi",
                &["Belabo", "Monohardi", "Narsingdi Sadar", "Palash", "Raipura", "Shibpur"],
            ),
            ("Rajbari", &["Baliakandi", "Goalandaghat", "Kalukhali", "Pangsha", "Rajbari Sadar"]),
            (
                "Shariatpur",
                &["Bhedarganj", "Damudya", "Gosairhat", "Naria", "Shariatpur Sadar", "Zanjira"],
            ),
            (
                "Tangail",
                &[
                    "Basail",
                    "Bhuapur",
                    "Delduar",
                    "Dhanbari",
                    "Ghatail",
                    "Gopalpur",
                    "Kalihati",
                    "Madhupur",
                    "Mirzapur",
                    "Nagarpur",
                    "Sakhipur",
                    "Tangail Sadar",
                ],
            ),
        ],
    ),
    (
        "Khulna",
        &[
            (
                "Bagerhat",
                &[
                    "Bagerhat Sadar",
                    "Chitalmari",
                    "Fakirhat",
                    "Kachua",
                    "Mollahat",
                    "Mongla",
                    "Morrelganj",
                    "Rampal",
                    "Sarankhola",
                ],
            ),
            ("Chuadanga", &["Alamdanga", "Chuadanga Sadar", "Damurhuda", "Jibannagar"]),
            (
                "Jashore",
                &[
                    "Abhaynagar",
                    "Bagherpara",
                    "Chaugachha",
                    "Jashore Sadar",
                    "Jhikargachha",
                    "Keshabpur",
                    "Manirampur",
                    "Sharsha",
                ],
            ),
            (
                "Jhenaidah",
                &[
                    "Harinakunda",
                    "Jhenaidah Sadar",
                    "Kaliganj",
                    "Kotchandpur",
                    "Maheshpur",
                    "Shailkupa",
                ],
            ),
            (
                "Khulna",
                &[
                    "Batiaghata",
                    "Dacope",
                    "Dighalia",
                    "Dumuria",
                    "Koyra",
                    "Paikgachha",
                    "Phultala",
                    "Rupsha",
                    "Terokhada",
                ],
            ),
            (
                "Kushtia",
                &["Bheramara", "Daulatpur", "Khoksa", "Kumarkhali", "Kushtia Sadar", "Mirpur"],
            ),
            ("Magura", &["Magura Sadar", "Mohammadpur", "Shalikha", "Sreepur"]),
            ("Meherpur", &["Gangni", "Meherpur Sadar", "Mujibnagar"]),
            ("Narail", &["Kalia", "Lohagara", "Narail Sadar"]),
            (
                "Satkhira",
                &[
                    "Assasuni",
                    "Debhata",
                    "Kalaroa",
                    "Kaliganj",
                    "Satkhira Sadar",
                    "Shyamnagar",
                    "Tala",
                ],
            ),
        ],
    ),
    (
        "Mymensingh",
        &[
            (
                "Jamalpur",
                &[
                    "Bakshiganj",
                    "Dewanganj",
                    "Islampur",
                    "Jamalpur Sadar",
                    "Madarganj",
                    "Melandaha",
                    "Sarishabari",
                ],
            ),
            (
                "Mymensingh",
                &[
                    "Bhaluka",
                    "Dhobaura",
                    "Fulbaria",
                    "Gaffargaon",
                    "Gauripur",
                    "Haluaghat",
                    "Ishwarganj",
                    "Muktagachha",
                    "Mymensingh Sadar",
                    "Nandail",
                    "Phulpur",
                    "Trishal",
                ],
            ),
            (
                "Netrokona",
                &[
                    "Atpara",
                    "Barhatta",
                    "Durgapur",
                    "Kalmakanda",
                    "Kendua",
                    "Khaliajuri",
                    "Madan",
                    "Mohanganj",
                    "Netrokona Sadar",
                    "Purbadhala",
                ],
            ),
            ("Sherpur", &["Jhenaigati", "Nakla", "Nalitabari", "Sherpur Sadar", "Sreebardi"]),
        ],
    ),
    (
        "Rajshahi",
        &[
            (
                "Bogura",
                &[
                    "Adamdighi",
                    "Bogura Sadar",
                    "Dhunat",
                    "Dupchanchia",
                    "Gabtali",
                    "Kahaloo",
                    "Nandigram",
                    "Sariakandi",
                    "Shajahanpur",
                    "Sherpur",
                    "Shibganj",
                    "Sonatala",
                ],
            ),
            (
                "Chapai Nawabganj",
                &[
                    "Bholahat",
                    "Chapai Nawabganj Sadar",
                    "Gomastapur",
                    "Nachole",
                    "Shibganj",
                ],
            ),
            ("Joypurhat", &["Akkelpur", "Joypurhat Sadar", "Kalai", "Khetlal", "Panchbibi"]),
            (
                "Naogaon",
                &[
                    "Atrai",
                    "Badalgachhi",
                    "Dhamoirhat",
                    "Mahadebpur",
                    "Manda",
                    "Naogaon Sadar",
                    "Niamatpur",
                    "Patnitala",
                    "Porsha",
                    "Raninagar",
                    "Sapahar",
                ],
            ),
            (
                "Natore",
                &["Bagatipara", "Baraigram", "Gurudaspur", "Lalpur", "Natore Sadar", "Singra"],
            ),
            (
                "Pabna",
                &[
                    "Atgharia",
                    "Bera",
                    "Bhangura",
                    "Chatmohar",
                    "Faridpur",
                    "Ishwardi",
                    "Pabna Sadar",
                    "Santhia",
                    "Sujanagar",
                ],
            ),
            (
                "Rajshahi",
                &[
                    "Bagha",
                    "Bagmara",
                    "Charghat",
                    "Durgapur",
                    "Godagari",
                    "Mohanpur",
                    "Paba",
                    "Puthia",
                    "Tanore",
                ],
            ),
            (
                "Sirajganj",
                &[
                    "Belkuchi",
                    "Chauhali",
                    "Kamarkhanda",
                    "Kazipur",
                    "Raiganj",
                    "Shahjadpur",
                    "Sirajganj Sadar",
                    "Tarash",
                    "Ullahpara",
                ],
            ),
        ],
    ),
    (
        "Rangpur",
        &[
            (
                "Dinajpur",
                &[
                    "Birampur",
                    "Birganj",
                    "Biral",
                    "Bochaganj",
                    "Chirirbandar",
                    "Dinajpur Sadar",
                    "Fulbari",
                    "Ghoraghat",
                    "Hakimpur",
                    "Kaharole",
                    "Khansama",
                    "Nawabganj",
                    "Parbatipur",
                ],
            ),
            (
                "Gaibandha",
                &[
                    "Fulchhari",
                    "Gaibandha Sadar",
                    "Gobindaganj",
                    "Palashbari",
                    "Sadullapur",
                    "Saghata",
                    "Sundarganj",
                ],
            ),
            (
                "Kurigram",
                &[
                    "Bhurungamari",
                    "Char Rajibpur",
                    "Chilmari",
                    "Kurigram Sadar",
                    "Nageshwari",
                    "Phulbari",
                    "Rajarhat",
                    "Raomari",
                    "Ulipur",
                ],
            ),
            (
                "Lalmonirhat",
                &["Aditmari", "Hatibandha", "Kaliganj", "Lalmonirhat Sadar", "Patgram"],
            ),
            (
                "Nilphamari",
                &["Dimla", "Domar", "Jaldhaka", "Kishoreganj", "Nilphamari Sadar", "Saidpur"],
            ),
            ("Panchagarh", &["Atwari", "Boda", "Debiganj", "Panchagarh Sadar", "Tetulia"]),
            (
                "Rangpur",
                &[
                    "Badarganj",
                    "Gangachara",
                    "Kaunia",
                    "Mithapukur",
                    "Pirgachha",
                    "Pirganj",
                    "Rangpur Sadar",
                    "Taraganj",
                ],
            ),
            (
                "Thakurgaon",
                &["Baliadangi", "Haripur", "Pirganj", "Ranisankail", "Thakurgaon Sadar"],
            ),
        ],
    ),
    (
        "Sylhet",
        &[
            (
                "Habiganj",
                &[
                    "Ajmiriganj",
                    "Bahubal",
                    "Baniyachong",
                    "Chunarughat",
                    "Habiganj Sadar",
                    "Lakhai",
                    "Madhabpur",
                    "Nabiganj",
                ],
            ),
            (
                "Moulvibazar",
                &[
                    "Barlekha",
                    "Juri",
                    "Kamalganj",
                    "Kulaura",
                    "Moulvibazar Sadar",
                    "Rajnagar",
                    "Sreemangal",
                ],
            ),
            (
                "Sunamganj",
                &[
                    "Bishwamvarpur",
                    "Chhatak",
                    "Derai",
                    "Dharmapasha",
                    "Dowarabazar",
                    "Jagannathpur",
                    "Jamalganj",
                    "Sullah",
                    "Sunamganj Sadar",
                    "Tahirpur",
                ],
            ),
            (
                "Sylhet",
                &[
                    "Balaganj",
                    "Beanibazar",
                    "Bishwanath",
                    "Companiganj",
                    "Fenchuganj",
                    "Golapganj",
                    "Gowainghat",
                    "Jaintiapur",
                    "Kanaighat",
                    "Sylhet Sadar",
                    "Zakiganj",
                ],
            ),
        ],
    ),
];
