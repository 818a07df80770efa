//! Known-answer fixtures
//!
//! The RSA values use a 2048-bit key with E = 65537. Signatures cover the
//! digest of [`MESSAGE`](crate::MESSAGE); ciphertexts carry
//! [`PLAINTEXT`](crate::PLAINTEXT), with [`LABEL`](crate::LABEL) for OAEP.
//! Every randomized encoding drew its bytes from a fresh
//! [`StreamSource`](crate::StreamSource).
//!
//! The ECDSA signatures were made by an independent implementation over the
//! same message and are verify-only.

pub const RSA_2048_N: &str = concat!(
    "9d89ce44ef99c8a7effaae66096c364237d673ee3da84dbce8cfa79d5a28948e",
    "a92493e5017168ee135991175d13f4916591ed52c324e6bc90d556bc480f83fe",
    "a1660128670e2b8e4658b5a91ba30f02225d5534f339b6e6bccaab40223af532",
    "bf1b5f22c6311196d492d0cadb734fd81983d1958bb5528151e7868bcd6e0b64",
    "602b716ba29cde33215eda6c0f626f5fb14e2074c4a145e681d9452a037592c5",
    "8343586f2c653b4e39c2860faa8c79bd2a3a9838af15cf586b1c4fc5962bd4a2",
    "7c25e00debf81ebbfeaac55175e57603e983f56fa6f01ed26c1d149a9c2adbb7",
    "3eaa42344aeef8c47e4ee656ed3cca6c885f89ec8851e20390bf1b60ed8289e1",
);

pub const RSA_2048_P: &str = concat!(
    "dea1cf559d5a9b5c91d9f1548bd9dff5b13ee0c915ce5d4f2c187d532de33d94",
    "b3d5f56f377d9aaa14379b4c85a8039407a445f8404b4007fbdfb036db5f09c9",
    "39fc1bce19d61e58f196a0d7ce593ca1ced65a30fede446759333f2fc9d81f04",
    "94d0acc81c094ece8e7c8bf5ee6102d4a8a5586a9d9546a3dc41b7983d4a8099",
);

pub const RSA_2048_Q: &str = concat!(
    "b526683f1e92b8e2e32da2bfc0576d74edbe74f9d442cd6bb0de1e6e6f4533ca",
    "b1f831ae30612ae0b708af0f66898ed6e1874b1b2ac942f10ccbbfd2920cec90",
    "7dc31ebe17e373d504525e96a5d8503fdaec853e4b3c8aa7fd9bdad193f212a6",
    "8a325812aa5f161be02e191233e53150fe616bc2c1b226a03f62d0f364bc7889",
);

pub const RSA_2048_D: &str = concat!(
    "01b760a1eba257474d1c040e6487e34771684ab70bc0eba7e5396df00eed6640",
    "efa2d061ac5459fa4e07a9c701629845853fc3c025141fd76a1488ef60319b14",
    "89199d659d49d03baa9488d620d0f3f6e7fcf052b55ba99c75ee1753898beee3",
    "f0a511b2454a7f908f1c525e036a0c32a484852205f5a1c27aebf4d14d19a7d2",
    "19bbf3035e5c073aba63f1063fc027488e3c8718ccf2c8f8fec0e16b9bc1b75d",
    "6f70b96ad4a34a6128b10e8974c774c1b6a7bd4230ad7af1871707b8fb10ac11",
    "4ae27b67206a5209b21aba5730cb8efcaa8925fe3704b3ebc22da94f4618b381",
    "924eb622658939cf24607bbdaa0469bab7f5c9a1bd86b9a2e459b7c3cf20b781",
);

pub const RSA_2048_RSASSA_SHA1: &str = concat!(
    "6910340cd1e10bdf172a1f6bd039cb117e17b95079a742cacc38d70a58d9627e",
    "245b9bb73593e3c43548f23fa47bb5af46498e64616c1cdab997ddcc7db7a741",
    "42be0cb4624613c17637206ea5c26c0d4afdd24475592b053ff671b9e355e58a",
    "e50b60be080becd79a036cf38571c9a18a17d1cd29f0c3e8d8b0b3f27a6a47a2",
    "f5ffe8d01a8b67c2ca1f220e985ab31a352b1845bc7c22acf4f095f6d6128553",
    "d145263bbc462bce121a5acdf7fda7c01ccdb85504145f8bcf9e8d93c849f3d8",
    "69455b9d6ffe0e7dfa5509a350955cd5063473d8446ddf49cf90f1f34578be87",
    "9173002409ebc0dfd283bf4d7931511b01900a1b7a9d73054d075a9a24b0ec22",
);

pub const RSA_2048_PSS_SHA1: &str = concat!(
    "0eb0ddc75c3503fbcc0aa6a1b755f59855ffd0e02ea28755440590cab371cb6d",
    "3ff5958f28caf093d483a96d06ddd05131371cfa9ed9443b1940d6da60301580",
    "4ae055a1982539386bfb8a24837a7734fd626314ebcb180029a040837ec2201b",
    "6cc777b821f6a003304321e48e228efa727d143cb8a3cf099c5f95f5b3b85cf9",
    "7083960570c708a69130cc1c11f599f17d59ab1c8e5dbe6b78f27bd42fff0dca",
    "fc47e67a28f6bc3eacbd31df0219a1e1404d8e01568606e0c112c8009c1dceae",
    "d97e51dc790c0d3721d9a2bf24ad6394a8333d82a8de500443401054032f1285",
    "1179f0718fdfc821f00cd67368ddefe6b7dfc8453b89aff5411e7a7905e64063",
);

pub const RSA_2048_OAEP_SHA1: &str = concat!(
    "6a2c60a00256ed34a0c141c7b38da7de6040ce530ea5d71f464e1bba9c7c0829",
    "4e05b8aed9830e0a2fab050d85a210d330e7a44be522b0863e8f7aff88b8cee0",
    "0eca65d1f335d759a011a645f8e1e2e2f0ecd9f342c77cf17694ce8919d41e23",
    "7f537c805d476112f991237a6194b12b86172bc0fc00c2b3fc37d388f0602f50",
    "d886afbe256a5b14080b8048bbb879c01d25260b79b51325851c1d21e72446f3",
    "238d2ab79b229e20f16ce122eca22d5f8dcff363e7b473268e8f81b314092b66",
    "67654d81b3347a8be8b86a3ff56b7c0a18e91846b9d3e8fbb76d5f8625fd0432",
    "8c6c76fdd48ebb840b3b96d7485ddcdd500328084c6d4522ff5e854e1a93527a",
);

pub const RSA_2048_RSASSA_SHA256: &str = concat!(
    "24410661252ebe448649cbc6ae9dc53254981de79b96165b3ff34e18a8985938",
    "3a8ba3a6e7eab90eab5f1467a97230ac69a48e339079e08adb4a5b743ed69e63",
    "921b424b557e395cf64ef50863cfc25cd9d19070b6432b387867be9a9dc4632e",
    "de434d5e66e3ab3c3f6e1b85edea56655b3deb1b5769d1085a1661f42f55e57c",
    "037bafbc2a3c1d7f3112f31d63e19f2fd66e3f1f0426933cf78f86c1170be6d1",
    "3e3a91b64586a8c66a52b772bd63bc1b314bd14bb49c391098fc40e8e73effe5",
    "c6c39f0a59d49f776bb88a3f5df10ee77983ce7d9953df19da506f3ad0187374",
    "da26791d044ad5f9484d444682d9490582120758207cb75940716d93fe3330a1",
);

pub const RSA_2048_PSS_SHA256: &str = concat!(
    "14917ce7b06459b0dd20c400ee69bccf56f6854620b794b8835828e22d3e43e5",
    "5999044eed1b1c93888c270f23aa36949982b928b58feca63a83829891b6979d",
    "c3f10dee157b2549eccd315c89a7001ed91adf5dcce78b2809a8db488543d4c6",
    "320246209db2697b9a467dadde5bcfdda32bc38a305120e5d0e666e9afddfb89",
    "bc4147d0c85600ffcd19e31a4421f54eb8ba28fcbc35e2c2e09cd44538cac799",
    "48d19844572a65fc269ec0eb4cb4f687352752892d22e4bd0cd305ebbb6d038b",
    "7385c8152b4113bdae344bb1d5a97300bf8791f0f3fbd5921b58eabe05934245",
    "97068242592b8e681aa24b25c84f6fdba9c18f2997bc847a01934638e5093277",
);

pub const RSA_2048_OAEP_SHA256: &str = concat!(
    "308e9e6648e2822318be839548ab67f307c210c4e89d9d312f1975998ef6b725",
    "9a2781b923c64a4dd7de28e3143ee74c3119dc37317aec9c6893fa8b2771186d",
    "62e53d7f76229a682fc4eb4ccc66650c2c3742399505c76d66fa0b454bb95e1f",
    "ccdf88dbd5b821949c18b9707d4d8553a67d5afe98d8955415b70a20656fb371",
    "c3fb9aac20dbf50632ec73a7857557101b129eb290b7cedd112741e6a6293556",
    "bb209d4c902ed469db9de1fea7a9685207a3ab5a005026412dd72b2e9b774508",
    "fc2f151b26f61242da629efb3044d408f713de7433708813beadd2d3757e9382",
    "1fc878413c968d8ed737d5d88f78736930aaeb1e35593fe9848f15487d4adc0e",
);

pub const RSA_2048_RSASSA_SHA384: &str = concat!(
    "6bbf9b9718e5d984b8caea1798d1ff271449e909519cb064f12fc20200bda7d7",
    "9d829a7600ba9a077c6ddb272215eaf9138bba7f58a3a32724841237e097a3da",
    "85faf1feacde85cb4d4cbffdba8e569ed6ee4ca5576732e5a2262bf62b291f4a",
    "ad0ca64e490982b450ca4dedcc2b0832d7c91183ed69936ace48a737ca0a16c6",
    "d401624f054dc103405313bd3c95feac57f6f4c365d4ec33ca0edc119dd14ef6",
    "69cf5ee7b0c8c7c54106fa7db99282a9dcefebf0f85d9fc15448644040e67ab6",
    "d8b207333631fb996de17c9f8ed1d035e90916deeeb2ecef10025d74fd27f988",
    "a9964e551ca5f53e4d468d0620e78a79fe77e1d8220343a53c498df33c9d93b3",
);

pub const RSA_2048_PSS_SHA384: &str = concat!(
    "6e6fa70a479f9f93dbd34785543dc898d4b8be6fca211684cab82eac30d66bab",
    "e29e7badaabbb5c549dc8e9fdca9e12ef9e514ef23bc2fd5cb4bff8e690a414b",
    "d5ea4732b4ddc808170cbba149205097350e719ad39f5d1f1cc6e6760767d6d6",
    "275b82034a963b05ac68884002894af300e15ba854ad307db676958258637f13",
    "a6d38204cb2b8891f475d8736a3f4577bc6871f1cfa2a727b542e81471a5897a",
    "5b401b2d9c51abb6208db8905b815b3c86dbdc47e53140c78c7f08d172029eb3",
    "721ed5999158f6dbfbb843b6641b62f19389eff78e06a1bcba2c59c65b3949a3",
    "050afcbe8f0f2359ad11a4fa0ce35bcd0be60cf1a33fc001f710704f250299c2",
);

pub const RSA_2048_OAEP_SHA384: &str = concat!(
    "2485714da4575cd0670d86a81630b82058b7e6ca58398269db61a8bc44489120",
    "2570ae1789ed00efc9d88b3e4b0593ee10df85ad5098306cb33a4de6518eab8f",
    "a35fe26bbe592424c240a27866fd3329ccceed998069c1f584a0bf50d36417e0",
    "27c2f4152d1a969d821b305d447b58f3c5b7b5663fb49a574801700c21a5ce66",
    "b42e4101af3ba7a82c86f722cfa42f60a55dcf1a439c45d2ff14a0927137291e",
    "6efa234120a9d010eb529635128d1004007a15e3f4d03b20ee35e06404c1bc81",
    "cbfa0d46e0fdff2dc4e6bac0d90e3a568eb8d48ce947d85886b73ce543165002",
    "96794f33f4cbadcb41200bfdd86c80a935b83c7ef2b277fc869710795bb91819",
);

pub const RSA_2048_RSASSA_SHA512: &str = concat!(
    "804d3511fd323d1dd328289b7f5fe90ad58930dc4ff81de4a266d7a95670df1f",
    "c107b7c0581ce188b03d891bcc691ac6b38011ddbbb3b5eea1adec01578ca82a",
    "5d703d2540ad383fce7311c492f974f4e0871c38915a1c825c509b93b4ce2632",
    "7cf39c2e8cff365724f23f142f527e5cb97d9593e8b3e0aa87ce14cbe4ae5b83",
    "b9fc688af32dd3a31eeb10a3fe8c1418c611f3a30f75aeee9ca128d889a10927",
    "a6dc642804c221e0402f0afb49836c9ff884bccefe983d5450be809492103146",
    "ce83b8ddd6a4e14ad27158f538d50c6a961f09dbb143d7f865c2d91250094e12",
    "77324a5a6ad7602e655ba15a0ba5752f463c86c2e4a5c8b41fa0e38464e3a8ff",
);

pub const RSA_2048_PSS_SHA512: &str = concat!(
    "615905c7741cf434613f57ed3c49115bdee1e4b13f9a93c727b1e18955b3003d",
    "b6c48a6db3bfd737958169953e39d0f0b6e12eded7945e7e8c5c40c127f29721",
    "fbc6ece2a409dcfa4f1984dcb28277673c5111c2e691561c1fdadf96ed656569",
    "d6bb1a218b5f6bf6872d29b6eae848af16c687e8f868473081336d6fb5963dc7",
    "b9bfb2694cd2876f6deafccac18dac69686d7f95df5611d8a807bc27099a9050",
    "098085efa2b212cb6b0c8d758639a45471c173fe2497516121783a2bc914f6f9",
    "3821b29e62aad30375ac0a20b0661f0990f4872f1a9f1cc40241ef846a76ebd2",
    "ef0484d815ff1580ea64d2ca6dc9fb9244f73b9251a8c951f065953b29df13c0",
);

pub const RSA_2048_OAEP_SHA512: &str = concat!(
    "97450d325e1a1f85875ac105edcd640d553c73bc8964f85b8da16f4939af9b02",
    "421e908706b9fb245ea9e7c3ac59e5dae01be1ffc0f7fc598757560cdbd91662",
    "c1b53a28c492580d91e0a51328ff0779c9cf377112e900ba25cf64cb8137c362",
    "4d6116c9c236f7e15bfc56ea80facc56d8ed91763212626a4439319c38b117ca",
    "c93e2c5264421f14c76cca3614ecf002be3d209eb24a09a6cc9e75e0bf9cd2af",
    "677138fcc63cd34892e8fd4b9c28507c47d0277c28bbe23b580b961faafa4d3c",
    "9cbceb180cb0ea1ee5f600bbcedd69c7db99eb2748e710260a286fcb9fd4082e",
    "f80d8da0f17bdb3f059d647d9b0d341d7c145198274c4fd25f424ab127a3aa95",
);

pub const RSA_2048_RSAES: &str = concat!(
    "4e9e4c7fb287678f98741addd5a70850900b85f4d084eea47da30736ee1fca38",
    "4d6cceacbb005f78a410192044ad5e9c0bfad86773f613f092480aba61143a90",
    "93da8500c645c5d604f532c63cddf4bc695e974f937dad621139cf517fdbfc0c",
    "3bef75c8e7bb7b8e0dd737e54f12e1cd223d6c9b13610a97c211e47ff88c6007",
    "19bb14b0e459f86f1a965142cf445e21bc5f35e8c8a51f655d04326270379350",
    "61339bde3307bdf16bfd3ba5fddeb021517dfaf128ec26d5a0a1d459d4c6e18d",
    "8abe5cff442ed33bf7b030cb314defaeabd2a0bcc69c523ba5274d8ac565da68",
    "19179011733d053247982798a5d818a251ab707bac2056a25a17f9629569d217",
);

pub const ECDSA_P256_QX: &str = concat!(
    "5b16418a1c19a9c19dae5c4f211f2fd50a73e073b87a705c4b679a6c7f9df110",
);

pub const ECDSA_P256_QY: &str = concat!(
    "9e9b155f1dd9d74e149ff681ca29bd4cc3a3cb76919a9775e16aa411c1e639d8",
);

pub const ECDSA_P256_R: &str = concat!(
    "d0e6d282fbe32a6bbbebaa0a1b11c5ee16473bd36076b1236b73b33491809d7b",
);

pub const ECDSA_P256_S: &str = concat!(
    "ef7f3bf23ae5b0e57de60e866b36193bb3621c965c88fbdde5e9d15a7add5bc0",
);

pub const ECDSA_P384_QX: &str = concat!(
    "d0c0e1fa224162cf4b18fb6c9b0de1459f0706ebf8432d8139dab7d075f37ad6",
    "ab39dcd6f0600083c5b942bad5c7d1c9",
);

pub const ECDSA_P384_QY: &str = concat!(
    "a14371147a162140be05a1d23e1bae2b2fe8d1ce5f45f1d54d2449ced70e8cc3",
    "d5b5e70a869d841814ba3dc95a8942b6",
);

pub const ECDSA_P384_R: &str = concat!(
    "709f292c170910db66bb1de8a3864cdfe74f3e6e97df0d3d58efc86cbce98d89",
    "7cf22c391dcc8a524f765e9615e6f85c",
);

pub const ECDSA_P384_S: &str = concat!(
    "59835f00bfd05d92fb602b80bab30032b5b079d5bb8116331c92d11c28dcd0a7",
    "b533475af594c96e2a82694c41cad1ac",
);

pub const ECDSA_P256_D: &str = concat!(
    "000000000000000000000000000000001234567890abcdef112233445566778f",
);

pub const ECDSA_P384_D: &str = concat!(
    "0000000000000000000000000000000000000000000000000000000000000000",
    "1234567890abcdef1122334455667783",
);
